//! Build command presentation: fold trace as text, json or table.

use crate::cli::parse::OutputFormat;
use crate::tree::DagBuild;
use comfy_table::Table;
use serde_json::json;

const BLOB_PREVIEW_CHARS: usize = 60;

pub fn format_build_result(build: &DagBuild, format: OutputFormat, dry_run: bool) -> String {
    match format {
        OutputFormat::Text => format_text(build),
        OutputFormat::Json => {
            let out = json!({
                "root": build.root,
                "leaf_count": build.leaf_count,
                "blob_count": build.steps.len(),
                "dry_run": dry_run,
                "steps": build.steps,
            });
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => format_table(build, dry_run),
    }
}

/// One `<label> <contentid>=<blob>` line per resolved group, then the root
fn format_text(build: &DagBuild) -> String {
    let mut output = String::new();
    for step in &build.steps {
        output.push_str(&format!("{} {}={}\n", step.label, step.id, step.blob));
    }
    output.push_str(&format!("root {}", build.root));
    output
}

fn format_table(build: &DagBuild, dry_run: bool) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Pass", "Group", "Members", "Content ID", "Blob"]);
    for step in &build.steps {
        table.add_row(vec![
            step.pass.to_string(),
            step.label.clone(),
            step.members.to_string(),
            step.id.to_string(),
            preview(&step.blob),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\nRoot: {}\nLeaves: {}  Blobs: {}",
        build.root,
        build.leaf_count,
        build.steps.len()
    ));
    if dry_run {
        output.push_str("\n(dry run: nothing written)");
    }
    output
}

fn preview(blob: &str) -> String {
    if blob.chars().count() <= BLOB_PREVIEW_CHARS {
        return blob.to_string();
    }
    let head: String = blob.chars().take(BLOB_PREVIEW_CHARS - 3).collect();
    format!("{}...", head)
}
