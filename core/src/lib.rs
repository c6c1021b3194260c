//! portctl Core Library
//!
//! Cross-platform discovery of listening TCP sockets and safe termination of
//! the processes that own them. Provides two operations:
//! - [`list_listening_processes`]: which processes listen on which ports
//! - [`terminate_process`]: graceful signal, then forceful if needed
//!
//! Neither operation returns an error. Discovery degrades to an empty list,
//! termination reports failures in its [`TerminationOutcome`].
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Records, outcomes and normalization
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: Command runner, output parsers, platform selection, signals
//! - `application`: Discovery and termination services
//!
//! # Platform Support
//! - macOS and other Unix-likes: `lsof`
//! - Linux: `lsof`, falling back to `ss`
//! - Windows: PowerShell `Get-NetTCPConnection`

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::{PlatformKind, TokioCommandRunner};
pub use application::{DiscoveryService, Terminator};
pub use config::{Config, ConfigStore};
pub use domain::{ProcessRecord, Protocol, TerminationOutcome};
pub use error::{Error, Result};

/// List processes listening on local TCP ports using default settings.
///
/// Records are unique per `(pid, port)` and sorted by port.
pub async fn list_listening_processes() -> Vec<ProcessRecord> {
    list_listening_processes_with(&Config::default()).await
}

/// List processes listening on local TCP ports with explicit settings.
pub async fn list_listening_processes_with(config: &Config) -> Vec<ProcessRecord> {
    DiscoveryService::for_platform(TokioCommandRunner::new(), PlatformKind::current(), config)
        .list()
        .await
}

/// Terminate a process using default settings.
pub async fn terminate_process(pid: u32) -> TerminationOutcome {
    terminate_process_with(pid, &Config::default()).await
}

/// Terminate a process with explicit settings.
pub async fn terminate_process_with(pid: u32, config: &Config) -> TerminationOutcome {
    Terminator::from_config(adapters::platform_signaller(), config)
        .terminate(pid)
        .await
}
