//! Parser for `lsof -iTCP -sTCP:LISTEN -P -n` output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{dedupe_and_sort, ProcessRecord, Protocol};

use super::data_lines;

static LISTEN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":(\d+)\s*\(LISTEN\)$").expect("valid regex"));

static PORT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\d+)$").expect("valid regex"));

/// Parse lsof output into records.
///
/// Expected lsof output format:
/// ```text
/// COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
/// node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
/// ```
///
/// Rows with fewer than 9 columns or a non-numeric PID are skipped.
pub fn parse_lsof_output(output: &str) -> Vec<ProcessRecord> {
    let mut records = Vec::new();

    for line in data_lines(output) {
        // Parse lsof columns: COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME
        let components: Vec<&str> = line.split_whitespace().collect();
        if components.len() < 9 {
            continue;
        }

        let pid: u32 = match components[1].parse() {
            Ok(p) => p,
            Err(_) => continue,
        };

        // NAME may be followed by the "(LISTEN)" state column
        let port = extract_port(&components[8..].join(" "));

        records.push(ProcessRecord {
            pid,
            command: components[0].to_string(),
            user: components[2].to_string(),
            port,
            protocol: Protocol::Tcp,
            state: ProcessRecord::LISTEN.to_string(),
            fd: components[3].to_string(),
            socket_type: components[4].to_string(),
            device: components[5].to_string(),
            size_off: components[6].to_string(),
            node: components[7].to_string(),
            name: components[8].to_string(),
        });
    }

    dedupe_and_sort(records)
}

/// Extract the port from an lsof NAME field, or 0 if there is none.
fn extract_port(name: &str) -> u16 {
    LISTEN_SUFFIX
        .captures(name)
        .or_else(|| PORT_SUFFIX.captures(name))
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}
