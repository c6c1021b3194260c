//! Application layer - Use case services.
//!
//! This module contains the two services the rest of the world calls:
//!
//! - [`DiscoveryService`]: platform probes → command runner → parser →
//!   normalized record list
//! - [`Terminator`]: graceful signal, grace period, liveness probe,
//!   forceful signal
//!
//! Both depend only on the traits in `ports`, so tests inject fakes.

mod discovery;
mod termination;

pub use discovery::DiscoveryService;
pub use termination::Terminator;
