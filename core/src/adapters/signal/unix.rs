//! Unix signal delivery via `kill(2)`.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal as NixSignal};
use nix::unistd::Pid;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ports::{Signal, SignalPort};

/// Delivers SIGTERM / signal 0 / SIGKILL directly with `kill(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixSignaller;

impl UnixSignaller {
    pub fn new() -> Self {
        Self
    }
}

/// Convert a pid to a `kill(2)` target.
///
/// 0 and negative values address process groups, so they are refused.
fn target(pid: u32) -> Result<Pid> {
    match i32::try_from(pid) {
        Ok(raw) if raw > 0 => Ok(Pid::from_raw(raw)),
        _ => Err(Error::InvalidPid(pid)),
    }
}

impl SignalPort for UnixSignaller {
    async fn send(&self, pid: u32, signal: Signal) -> Result<()> {
        let target = target(pid)?;
        let nix_signal = match signal {
            Signal::Graceful => Some(NixSignal::SIGTERM),
            Signal::Probe => None,
            Signal::Force => Some(NixSignal::SIGKILL),
        };

        debug!(pid = pid, signal = %signal, "Sending signal to process");

        kill(target, nix_signal).map_err(|errno| match errno {
            Errno::ESRCH => Error::ProcessNotFound(pid),
            Errno::EPERM => {
                Error::PermissionDenied(format!("cannot send {} to process {}", signal, pid))
            }
            other => Error::Signal {
                pid,
                reason: other.to_string(),
            },
        })
    }
}
