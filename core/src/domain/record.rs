//! Listening socket record.

use serde::{Deserialize, Serialize};

// ============================================================================
// Protocol
// ============================================================================

/// Transport protocol of a listening socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Protocol {
    /// Get the display name for this protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ProcessRecord
// ============================================================================

/// One observed listening endpoint and the process that owns it.
///
/// Records are created fresh by every discovery call. `pid` and `port` are
/// `0` when the source tool did not report them; such records are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    /// Process ID owning the socket, or 0 when unattributed.
    pub pid: u32,
    /// Short process name as reported by the source tool.
    pub command: String,
    /// Owning user name, empty when unavailable.
    pub user: String,
    /// Listening port, or 0 when it could not be parsed.
    pub port: u16,
    pub protocol: Protocol,
    /// Socket state; always `LISTEN` for discovered records.
    pub state: String,
    /// File descriptor tag (lsof `FD` column).
    pub fd: String,
    /// Socket type (lsof `TYPE` column, e.g. `IPv4`).
    #[serde(rename = "type")]
    pub socket_type: String,
    pub device: String,
    /// lsof `SIZE/OFF` column.
    pub size_off: String,
    /// lsof `NODE` column.
    pub node: String,
    /// Endpoint string, e.g. `*:3001` from lsof or `0.0.0.0:3389 (LISTEN)`
    /// synthesized for PowerShell rows.
    pub name: String,
}

impl ProcessRecord {
    /// State reported for every discovered record.
    pub const LISTEN: &'static str = "LISTEN";

    /// Create a TCP listening record with empty diagnostic fields.
    pub fn listening(
        pid: u32,
        command: impl Into<String>,
        port: u16,
        name: impl Into<String>,
    ) -> Self {
        Self {
            pid,
            command: command.into(),
            user: String::new(),
            port,
            protocol: Protocol::Tcp,
            state: Self::LISTEN.to_string(),
            fd: String::new(),
            socket_type: String::new(),
            device: String::new(),
            size_off: String::new(),
            node: Protocol::Tcp.to_string(),
            name: name.into(),
        }
    }

    /// Set the owning user.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Check if this record matches a search term.
    ///
    /// Matches case-insensitively on port, command, user and name.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.port.to_string().contains(&term)
            || self.command.to_lowercase().contains(&term)
            || self.user.to_lowercase().contains(&term)
            || self.name.to_lowercase().contains(&term)
    }
}

impl std::fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (PID: {}, Process: {})",
            self.protocol, self.port, self.pid, self.command
        )
    }
}
