//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`
//! plus the pure parsers for the diagnostic tools they drive.

pub mod parsers;
pub mod platform;
pub mod runner;
pub mod signal;

// Re-export main types for convenience
pub use platform::{PlatformKind, Probe};
pub use runner::TokioCommandRunner;
pub use signal::{platform_signaller, PlatformSignaller};
