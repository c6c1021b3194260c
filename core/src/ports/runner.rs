//! Command runner port (interface).

/// Captured result of one external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit status; [`CommandOutput::SPAWN_FAILED`] when the program could not
    /// be started or was terminated by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    /// Exit code reported when no real status is available.
    pub const SPAWN_FAILED: i32 = -1;

    /// Output of a program that could not be run at all.
    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: reason.into(),
            exit_code: Self::SPAWN_FAILED,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Port for running diagnostic commands.
///
/// Implementations must not fail: a nonzero exit or a missing executable is
/// reported through [`CommandOutput::exit_code`] so callers can fall back.
pub trait CommandRunnerPort: Send + Sync {
    /// Run `program` with `args` and capture its output.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl std::future::Future<Output = CommandOutput> + Send;
}
