//! Parsers for the output of the diagnostic tools.
//!
//! Each parser is pure: text in, normalized records out. Parsing is
//! best-effort: a row that cannot be read is skipped, a field that cannot be
//! read (usually the port) degrades to its zero value.

mod lsof;
mod powershell;
mod ss;

pub use lsof::parse_lsof_output;
pub use powershell::parse_powershell_json;
pub use ss::parse_ss_output;

use crate::domain::ProcessRecord;

/// Output family of a diagnostic tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// `lsof` column table.
    Lsof,
    /// `ss` socket statistics.
    Ss,
    /// PowerShell `ConvertTo-Json` document.
    PowerShellJson,
}

impl OutputFormat {
    pub fn parse(&self, output: &str) -> Vec<ProcessRecord> {
        match self {
            OutputFormat::Lsof => parse_lsof_output(output),
            OutputFormat::Ss => parse_ss_output(output),
            OutputFormat::PowerShellJson => parse_powershell_json(output),
        }
    }

    /// Check whether raw tool output carries anything beyond a header.
    ///
    /// Table formats start with a header line; the JSON document has none.
    pub fn has_data(&self, output: &str) -> bool {
        match self {
            OutputFormat::Lsof | OutputFormat::Ss => data_lines(output).next().is_some(),
            OutputFormat::PowerShellJson => !output.trim().is_empty(),
        }
    }
}

/// Split trimmed output into data lines, dropping the header.
///
/// Output consisting of only a header (or nothing) has no data lines.
fn data_lines(output: &str) -> impl Iterator<Item = &str> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter(|line| !line.is_empty())
}
