//! Error types for the portctl-core library.

use thiserror::Error;

/// Result type alias for portctl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during discovery and process termination.
///
/// The two public operations never surface these directly: discovery
/// degrades to an empty list, termination folds the message into a
/// [`TerminationOutcome`](crate::domain::TerminationOutcome).
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to deliver a signal to a process.
    #[error("Failed to signal process {pid}: {reason}")]
    Signal { pid: u32, reason: String },

    /// Permission denied for an operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The target process does not exist.
    #[error("No such process: {0}")]
    ProcessNotFound(u32),

    /// The pid cannot be addressed safely on this platform.
    #[error("Invalid process id: {0}")]
    InvalidPid(u32),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ProcessNotFound(1234);
        assert!(err.to_string().contains("1234"));

        let err = Error::Signal {
            pid: 42,
            reason: "EPERM: Operation not permitted".to_string(),
        };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("Operation not permitted"));

        let err = Error::Config("bad value".to_string());
        assert!(err.to_string().contains("bad value"));
    }
}
