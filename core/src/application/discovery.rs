//! Listener discovery service.

use tracing::{debug, warn};

use crate::adapters::{PlatformKind, Probe};
use crate::config::Config;
use crate::domain::ProcessRecord;
use crate::ports::CommandRunnerPort;

/// Application service for discovering listening processes.
///
/// Holds no state between calls: every [`list`](Self::list) runs the
/// probes again and builds fresh records.
pub struct DiscoveryService<R: CommandRunnerPort> {
    runner: R,
    probes: Vec<Probe>,
}

impl<R: CommandRunnerPort> DiscoveryService<R> {
    /// Create a discovery service trying `probes` in order.
    pub fn new(runner: R, probes: Vec<Probe>) -> Self {
        Self { runner, probes }
    }

    /// Create a discovery service for `platform` using the configured tools.
    pub fn for_platform(runner: R, platform: PlatformKind, config: &Config) -> Self {
        Self::new(runner, platform.probes(&config.tools))
    }

    /// Probes this service tries, in order.
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// List listening processes.
    ///
    /// The first probe that exits successfully with data is parsed; the rest
    /// are not run. Returns an empty list when every probe fails.
    pub async fn list(&self) -> Vec<ProcessRecord> {
        for probe in &self.probes {
            let output = self.runner.run(&probe.program, &probe.args).await;

            if !output.success() {
                debug!(
                    program = %probe.program,
                    exit_code = output.exit_code,
                    stderr = %output.stderr.trim(),
                    "Probe failed, trying next"
                );
                continue;
            }

            if !probe.format.has_data(&output.stdout) {
                debug!(program = %probe.program, "Probe produced no data, trying next");
                continue;
            }

            let records = probe.format.parse(&output.stdout);
            debug!(program = %probe.program, count = records.len(), "Discovered listeners");
            return records;
        }

        warn!("No discovery probe produced listener data");
        Vec::new()
    }
}
