//! Result of a termination attempt.

use serde::{Deserialize, Serialize};

/// Outcome reported by `terminate_process`.
///
/// Termination never fails with an `Err`; every failure mode is folded into
/// `success = false` with a human-readable `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TerminationOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

impl From<crate::error::Result<()>> for TerminationOutcome {
    fn from(result: crate::error::Result<()>) -> Self {
        match result {
            Ok(()) => Self::succeeded(),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}
