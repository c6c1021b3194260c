//! Signal delivery adapters.
//!
//! Platform-specific implementations of [`SignalPort`](crate::ports::SignalPort).

#[cfg(unix)]
mod unix;
mod windows;

#[cfg(unix)]
pub use unix::UnixSignaller;
pub use windows::WindowsSignaller;

/// Signal adapter for the current platform.
#[cfg(unix)]
pub type PlatformSignaller = UnixSignaller;

/// Signal adapter for the current platform.
#[cfg(windows)]
pub type PlatformSignaller = WindowsSignaller<super::TokioCommandRunner>;

/// Create the signal adapter for the current platform.
#[cfg(unix)]
pub fn platform_signaller() -> PlatformSignaller {
    UnixSignaller::new()
}

/// Create the signal adapter for the current platform.
#[cfg(windows)]
pub fn platform_signaller() -> PlatformSignaller {
    WindowsSignaller::new(super::TokioCommandRunner::new())
}
