//! Signal delivery port (interface).

use crate::error::Result;

/// Signals used by the termination engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Termination request the process may intercept (SIGTERM).
    Graceful,
    /// No-op delivery used only to test liveness (signal 0).
    Probe,
    /// Unconditional termination (SIGKILL).
    Force,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Signal::Graceful => "SIGTERM",
            Signal::Probe => "0",
            Signal::Force => "SIGKILL",
        };
        f.write_str(name)
    }
}

/// Port for delivering signals to processes.
///
/// This trait defines the interface for process termination.
/// Implementations handle platform-specific signal handling.
pub trait SignalPort: Send + Sync {
    /// Deliver `signal` to `pid`.
    ///
    /// For [`Signal::Probe`], `Ok(())` means the process is still alive.
    fn send(
        &self,
        pid: u32,
        signal: Signal,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
