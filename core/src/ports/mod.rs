//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with the operating system. Implementations live in `adapters`.

mod runner;
mod signal;

pub use runner::{CommandOutput, CommandRunnerPort};
pub use signal::{Signal, SignalPort};
