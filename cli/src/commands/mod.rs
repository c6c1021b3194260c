//! Command implementations.
//!
//! Commands write to the given streams and return the process exit status
//! instead of exiting, so they can run against fake dependencies.

pub mod kill;
pub mod list;

use std::future::Future;
use std::io::Write;

use anyhow::Result;
use portctl_core::{Config, ProcessRecord, TerminationOutcome};

use crate::Commands;

/// Exit status for success.
pub const EXIT_OK: u8 = 0;
/// Exit status when the command could not do what was asked.
pub const EXIT_FAILURE: u8 = 1;

/// The two core operations the commands consume.
pub trait Deps {
    fn list(&self) -> impl Future<Output = Vec<ProcessRecord>>;
    fn terminate(&self, pid: u32) -> impl Future<Output = TerminationOutcome>;
}

/// Dependencies backed by the real system.
pub struct SystemDeps {
    config: Config,
}

impl SystemDeps {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Deps for SystemDeps {
    async fn list(&self) -> Vec<ProcessRecord> {
        portctl_core::list_listening_processes_with(&self.config).await
    }

    async fn terminate(&self, pid: u32) -> TerminationOutcome {
        portctl_core::terminate_process_with(pid, &self.config).await
    }
}

/// Run a parsed command and return its exit status.
///
/// Without a subcommand, lists all ports.
pub async fn dispatch<D: Deps>(
    command: Option<Commands>,
    deps: &D,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    match command {
        Some(Commands::List { search, json }) => {
            list::run(deps, search.as_deref(), json, out).await
        }
        Some(Commands::Kill { port }) => kill::run(deps, port, out, err).await,
        None => list::run(deps, None, false, out).await,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{record, FakeDeps};
    use super::*;

    #[tokio::test]
    async fn test_dispatch_defaults_to_list() {
        let deps = FakeDeps {
            records: vec![record(101, "node", "alice", 3001)],
            ..FakeDeps::default()
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = dispatch(None, &deps, &mut out, &mut err).await.unwrap();

        assert_eq!(status, EXIT_OK);
        assert!(String::from_utf8(out).unwrap().contains("3001"));
    }

    #[tokio::test]
    async fn test_dispatch_kill() {
        let deps = FakeDeps {
            records: vec![record(99, "node", "alice", 3001)],
            ..FakeDeps::default()
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = dispatch(Some(Commands::Kill { port: 3001 }), &deps, &mut out, &mut err)
            .await
            .unwrap();

        assert_eq!(status, EXIT_OK);
        assert_eq!(*deps.terminated.borrow(), vec![99]);
    }
}
