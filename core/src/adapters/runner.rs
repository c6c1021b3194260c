//! Command runner backed by `tokio::process`.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::ports::{CommandOutput, CommandRunnerPort};

/// Runs external programs as child processes and captures their output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunnerPort for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> CommandOutput {
        debug!(program = program, ?args, "Running command");

        let output = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                debug!(program = program, error = %e, "Failed to spawn command");
                return CommandOutput::spawn_failed(format!("Failed to run {}: {}", program, e));
            }
        };

        let exit_code = output.status.code().unwrap_or(CommandOutput::SPAWN_FAILED);
        debug!(program = program, exit_code = exit_code, "Command finished");

        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_executable_does_not_fail() {
        let runner = TokioCommandRunner::new();
        let output = runner
            .run("portctl-definitely-not-a-real-binary", &[])
            .await;

        assert!(!output.success());
        assert_eq!(output.exit_code, CommandOutput::SPAWN_FAILED);
        assert!(output.stdout.is_empty());
        assert!(output.stderr.contains("portctl-definitely-not-a-real-binary"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_status() {
        let runner = TokioCommandRunner::new();
        let args = vec!["-c".to_string(), "echo hello; echo oops >&2; exit 3".to_string()];
        let output = runner.run("sh", &args).await;

        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
    }
}
