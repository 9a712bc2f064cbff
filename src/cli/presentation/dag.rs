//! Read-side presentation: resolve, verify and list.

use crate::cli::parse::OutputFormat;
use crate::content_id::ContentId;
use crate::dag::{Resolved, VerifyReport};
use comfy_table::Table;
use serde_json::{json, Value as JsonValue};

/// Sub-tree identifier, or the scalar's text
pub fn format_resolved(resolved: &Resolved) -> String {
    match resolved {
        Resolved::Link(id) => id.to_string(),
        Resolved::Scalar(JsonValue::String(s)) => s.clone(),
        Resolved::Scalar(other) => other.to_string(),
    }
}

pub fn format_verify_report(report: &VerifyReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Text | OutputFormat::Table => {
            let mut output = String::new();
            if let Some(root) = &report.root {
                output.push_str(&format!("Root: {}\n", root));
            }
            output.push_str(&format!(
                "Blobs: {}\nLeaves: {}\n",
                report.blobs, report.leaves
            ));
            for id in &report.dangling {
                output.push_str(&format!("dangling {}\n", id));
            }
            for (id, reason) in &report.corrupt {
                output.push_str(&format!("corrupt {} ({})\n", id, reason));
            }
            output.push_str(if report.is_ok() { "OK" } else { "FAILED" });
            output
        }
    }
}

pub fn format_list_result(ids: &[ContentId], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if ids.is_empty() {
                return "No artifacts stored.".to_string();
            }
            ids.iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputFormat::Json => {
            let out = json!({ "artifacts": ids, "total": ids.len() });
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Content ID", "Algorithm", "Digest"]);
            for id in ids {
                table.add_row(vec![
                    id.to_string(),
                    id.algorithm().name().to_string(),
                    id.short(),
                ]);
            }
            format!("{}\n\nTotal: {} artifact(s)", table, ids.len())
        }
    }
}
