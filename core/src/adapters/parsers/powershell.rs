//! Parser for the PowerShell listener query.
//!
//! The query pipes `Get-NetTCPConnection -State Listen` through
//! `Get-Process` and `ConvertTo-Json`. PowerShell emits a bare object when
//! there is exactly one listener and an array otherwise.

use serde_json::Value;
use tracing::debug;

use crate::domain::{dedupe_and_sort, ProcessRecord};

/// Parse the JSON document into records.
///
/// Malformed JSON yields an empty list. Each entry is read on its own: a
/// field that is missing or of the wrong type takes its default instead of
/// rejecting the document.
pub fn parse_powershell_json(output: &str) -> Vec<ProcessRecord> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let entries = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(entries)) => entries,
        Ok(entry @ Value::Object(_)) => vec![entry],
        Ok(other) => {
            debug!(kind = json_kind(&other), "Discarding non-object PowerShell output");
            return Vec::new();
        }
        Err(e) => {
            debug!(error = %e, "Discarding unparseable PowerShell output");
            return Vec::new();
        }
    };

    let records = entries.iter().map(entry_to_record).collect();

    dedupe_and_sort(records)
}

/// Build a record from one row of the PowerShell query.
fn entry_to_record(entry: &Value) -> ProcessRecord {
    let port = entry
        .get("Port")
        .and_then(Value::as_u64)
        .and_then(|p| u16::try_from(p).ok())
        .unwrap_or(0);
    let pid = entry
        .get("Pid")
        .and_then(Value::as_u64)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(0);
    let command = entry
        .get("Command")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or("unknown");
    let address = entry
        .get("LocalAddress")
        .and_then(Value::as_str)
        .unwrap_or("*");

    ProcessRecord::listening(pid, command, port, format!("{}:{} (LISTEN)", address, port))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let output = r#"[
            {"Port": 8080, "Pid": 34, "Command": "python", "LocalAddress": "::"},
            {"Port": 3001, "Pid": 12, "Command": "node", "LocalAddress": "0.0.0.0"}
        ]"#;

        let records = parse_powershell_json(output);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].port, 3001);
        assert_eq!(records[0].pid, 12);
        assert_eq!(records[0].command, "node");
        assert_eq!(records[0].name, "0.0.0.0:3001 (LISTEN)");
        assert_eq!(records[1].name, ":::8080 (LISTEN)");
    }

    #[test]
    fn test_single_object() {
        let output = r#"{"Port": 445, "Pid": 4, "Command": "System", "LocalAddress": "0.0.0.0"}"#;

        let records = parse_powershell_json(output);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].port, 445);
        assert_eq!(records[0].command, "System");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let output = r#"[{"Command": null}, {"Port": 135, "Command": ""}]"#;

        let records = parse_powershell_json(output);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].port, 0);
        assert_eq!(records[0].pid, 0);
        assert_eq!(records[0].command, "unknown");
        assert_eq!(records[0].name, "*:0 (LISTEN)");
        assert_eq!(records[1].port, 135);
        assert_eq!(records[1].command, "unknown");
    }

    #[test]
    fn test_malformed_json_is_empty() {
        assert!(parse_powershell_json("{not json").is_empty());
        assert!(parse_powershell_json("Get-NetTCPConnection : Access denied").is_empty());
        assert!(parse_powershell_json("   ").is_empty());
    }

    #[test]
    fn test_mistyped_entry_keeps_its_neighbours() {
        let output = r#"[
            {"Port": 80, "Pid": 4, "Command": "System", "LocalAddress": "0.0.0.0"},
            {"Port": 3000, "Pid": 77, "Command": 123, "LocalAddress": "::"},
            {"Port": "8080", "Pid": -1, "Command": "svc", "LocalAddress": ["::"]},
            "not an entry"
        ]"#;

        let records = parse_powershell_json(output);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].port, 0);
        assert_eq!(records[0].pid, 0);
        assert_eq!(records[0].command, "svc");
        assert_eq!(records[0].name, "*:0 (LISTEN)");
        assert_eq!(records[1].port, 80);
        assert_eq!(records[1].command, "System");
        assert_eq!(records[2].port, 3000);
        assert_eq!(records[2].pid, 77);
        assert_eq!(records[2].command, "unknown");
        assert_eq!(records[2].name, ":::3000 (LISTEN)");
    }

    #[test]
    fn test_deduplicates_dual_stack() {
        let output = r#"[
            {"Port": 5000, "Pid": 9, "Command": "app", "LocalAddress": "::"},
            {"Port": 5000, "Pid": 9, "Command": "app", "LocalAddress": "0.0.0.0"}
        ]"#;

        let records = parse_powershell_json(output);
        assert_eq!(records.len(), 1);
        assert!(records[0].name.starts_with("::"));
    }
}
