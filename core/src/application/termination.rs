//! Escalating process termination.
//!
//! The termination follows this pattern:
//! 1. Send the graceful signal (SIGTERM, or plain `taskkill` on Windows)
//! 2. Wait the grace period (500ms by default) for the process to clean up
//! 3. Probe whether the process is still alive
//! 4. If still alive, send the forceful signal (SIGKILL / `taskkill /F`)

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_GRACE_PERIOD_MS};
use crate::domain::TerminationOutcome;
use crate::ports::{Signal, SignalPort};

/// Application service terminating processes by pid.
pub struct Terminator<S: SignalPort> {
    signaller: S,
    grace_period: Duration,
}

impl<S: SignalPort> Terminator<S> {
    /// Create a terminator with the default 500ms grace period.
    pub fn new(signaller: S) -> Self {
        Self::with_grace_period(signaller, Duration::from_millis(DEFAULT_GRACE_PERIOD_MS))
    }

    pub fn with_grace_period(signaller: S, grace_period: Duration) -> Self {
        Self {
            signaller,
            grace_period,
        }
    }

    pub fn from_config(signaller: S, config: &Config) -> Self {
        Self::with_grace_period(signaller, config.grace_period())
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    pub fn signaller(&self) -> &S {
        &self.signaller
    }

    /// Terminate `pid`, escalating to the forceful signal if needed.
    ///
    /// Only a failure to deliver the graceful signal is reported; it
    /// short-circuits without waiting. A failed liveness probe means the
    /// process already exited.
    pub async fn terminate(&self, pid: u32) -> TerminationOutcome {
        debug!(pid = pid, "Attempting graceful termination");

        if let Err(e) = self.signaller.send(pid, Signal::Graceful).await {
            warn!(pid = pid, error = %e, "Failed to send graceful signal");
            return TerminationOutcome::failed(e.to_string());
        }

        sleep(self.grace_period).await;

        if let Err(e) = self.signaller.send(pid, Signal::Probe).await {
            debug!(pid = pid, reason = %e, "Process exited after graceful signal");
            return TerminationOutcome::succeeded();
        }

        debug!(pid = pid, "Process still running, sending forceful signal");
        if let Err(e) = self.signaller.send(pid, Signal::Force).await {
            // The process may exit between the probe and this signal
            warn!(pid = pid, error = %e, "Forceful signal failed");
        }

        TerminationOutcome::succeeded()
    }
}
