//! Parser for `ss -ltnp` output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{dedupe_and_sort, ProcessRecord};

use super::data_lines;

static ADDRESS_PORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+:(\d+)").expect("valid regex"));

static USERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"users:\(\("([^"]+)",pid=(\d+)"#).expect("valid regex"));

/// Command reported when ss does not attribute a socket to a process.
const UNKNOWN_COMMAND: &str = "unknown";

/// Parse ss output into records.
///
/// Expected ss output format:
/// ```text
/// State  Recv-Q Send-Q Local Address:Port Peer Address:Port Process
/// LISTEN 0      128        0.0.0.0:3001      0.0.0.0:*     users:(("node",pid=123,fd=12))
/// ```
///
/// Every data line yields a record. The port is the first `<addr>:<digits>`
/// token on the line (0 if none); without a `users:` token the record is
/// unattributed (`pid` 0, command `unknown`). ss only shows owners for
/// sockets the caller may inspect, so unattributed rows are common when not
/// running as root.
pub fn parse_ss_output(output: &str) -> Vec<ProcessRecord> {
    let records = data_lines(output)
        .map(|line| {
            let port: u16 = ADDRESS_PORT
                .captures(line)
                .and_then(|caps| caps[1].parse().ok())
                .unwrap_or(0);

            let (command, pid) = match USERS.captures(line) {
                Some(caps) => (caps[1].to_string(), caps[2].parse::<u32>().unwrap_or(0)),
                None => (UNKNOWN_COMMAND.to_string(), 0),
            };

            ProcessRecord::listening(pid, command, port, line.trim())
        })
        .collect();

    dedupe_and_sort(records)
}
