//! Domain layer - Pure data models and normalization.
//!
//! This module contains the value types produced by discovery and
//! termination. These types have no I/O dependencies and can be tested
//! in isolation.

mod normalize;
mod outcome;
mod record;

// Re-export all domain types
pub use normalize::dedupe_and_sort;
pub use outcome::TerminationOutcome;
pub use record::{ProcessRecord, Protocol};
