//! List command - show all listening ports.

use std::io::Write;

use anyhow::Result;
use portctl_core::ProcessRecord;

use super::{Deps, EXIT_OK};

pub async fn run<D: Deps>(
    deps: &D,
    search: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<u8> {
    let mut records = deps.list().await;

    if let Some(term) = search {
        records.retain(|r| r.matches_search(term));
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        return Ok(EXIT_OK);
    }

    if records.is_empty() {
        writeln!(out, "No listening ports found.")?;
        return Ok(EXIT_OK);
    }

    let rows: Vec<[String; 5]> = records.iter().map(row).collect();
    write_table(out, ["PORT", "PID", "COMMAND", "USER", "NAME"], &rows)?;
    Ok(EXIT_OK)
}

fn row(record: &ProcessRecord) -> [String; 5] {
    [
        record.port.to_string(),
        record.pid.to_string(),
        record.command.clone(),
        record.user.clone(),
        record.name.clone(),
    ]
}

/// Write left-aligned columns separated by two spaces, with a dashed rule
/// under the header.
fn write_table<const N: usize>(
    out: &mut impl Write,
    headers: [&str; N],
    rows: &[[String; N]],
) -> Result<()> {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    writeln!(out, "{}", format_row(&headers))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    writeln!(out, "{}", format_row(&rule))?;

    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        writeln!(out, "{}", format_row(&cells))?;
    }

    Ok(())
}
