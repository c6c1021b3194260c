//! Platform selection for listener discovery.
//!
//! Each platform is bound to an ordered list of probes (tool invocation plus
//! the parser for its output). Discovery takes the first probe that runs
//! successfully and prints something, so Linux expresses "lsof, else ss"
//! as a two-element list.

use crate::config::ToolPaths;

use super::parsers::OutputFormat;

/// PowerShell pipeline listing TCP listeners with their owning process.
const WINDOWS_LISTENER_QUERY: &str = "Get-NetTCPConnection -State Listen | \
ForEach-Object { \
$p = Get-Process -Id $_.OwningProcess -ErrorAction SilentlyContinue; \
[PSCustomObject]@{ \
Port=$_.LocalPort; \
Pid=$_.OwningProcess; \
Command=$p.ProcessName; \
LocalAddress=$_.LocalAddress \
} \
} | ConvertTo-Json -Depth 3";

/// Operating system family, as far as discovery is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Windows,
    Linux,
    /// macOS, the BSDs and anything else treated as Unix-like.
    Unix,
}

impl PlatformKind {
    /// Platform of the running process.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` identifier to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => PlatformKind::Windows,
            "linux" => PlatformKind::Linux,
            _ => PlatformKind::Unix,
        }
    }

    /// Probes to try, in order.
    pub fn probes(&self, tools: &ToolPaths) -> Vec<Probe> {
        match self {
            PlatformKind::Windows => vec![Probe::powershell(&tools.powershell)],
            PlatformKind::Linux => vec![Probe::lsof(&tools.lsof), Probe::ss(&tools.ss)],
            PlatformKind::Unix => vec![Probe::lsof(&tools.lsof)],
        }
    }
}

/// A diagnostic tool invocation and the parser for its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub program: String,
    pub args: Vec<String>,
    pub format: OutputFormat,
}

impl Probe {
    /// `lsof -iTCP -sTCP:LISTEN -P -n`
    ///
    /// Flags explained:
    /// - -iTCP: Show only TCP sockets
    /// - -sTCP:LISTEN: Show only listening sockets
    /// - -P: Show port numbers (don't resolve to service names)
    /// - -n: Show IP addresses (don't resolve to hostnames)
    pub fn lsof(program: &str) -> Self {
        Self::new(program, &["-iTCP", "-sTCP:LISTEN", "-P", "-n"], OutputFormat::Lsof)
    }

    /// `ss -ltnp`
    ///
    /// Flags explained:
    /// -l, --listening     display listening sockets
    /// -t, --tcp           display only TCP sockets
    /// -n, --numeric       don't resolve service names
    /// -p, --processes     show process using socket
    pub fn ss(program: &str) -> Self {
        Self::new(program, &["-ltnp"], OutputFormat::Ss)
    }

    /// `powershell -NoProfile -Command <listener query>`
    pub fn powershell(program: &str) -> Self {
        Self::new(
            program,
            &["-NoProfile", "-Command", WINDOWS_LISTENER_QUERY],
            OutputFormat::PowerShellJson,
        )
    }

    fn new(program: &str, args: &[&str], format: OutputFormat) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            format,
        }
    }
}
