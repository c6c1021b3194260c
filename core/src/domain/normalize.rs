//! Normalization of raw parser output.

use std::collections::HashSet;

use super::ProcessRecord;

/// Collapse duplicate observations and order records by port.
///
/// The first record seen for each `(pid, port)` pair wins; lsof reports one
/// row per address family, so a dual-stack listener shows up twice. The
/// result is stable-sorted by port, ties keep encounter order.
pub fn dedupe_and_sort(records: Vec<ProcessRecord>) -> Vec<ProcessRecord> {
    let mut seen: HashSet<(u32, u16)> = HashSet::new();
    let mut unique: Vec<ProcessRecord> = records
        .into_iter()
        .filter(|r| seen.insert((r.pid, r.port)))
        .collect();

    unique.sort_by_key(|r| r.port);
    unique
}
