//! Item export helpers shared by all clients.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Item;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render items as pretty-printed JSON in the storage record shape.
pub fn render_json_export(items: &[Item]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}

/// Render items as a Markdown task list.
#[must_use]
pub fn render_markdown_export(items: &[Item]) -> String {
    let mut output = String::new();

    for item in items {
        let mark = if item.completed { 'x' } else { ' ' };
        let text = item.text.split_whitespace().collect::<Vec<_>>().join(" ");
        let _ = writeln!(output, "- [{mark}] {text}");
    }

    output
}

/// Render items based on selected export format.
pub fn render_items_export(items: &[Item], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(items),
        ExportFormat::Markdown => Ok(render_markdown_export(items)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("blanjan-export-{timestamp_ms}.{}", format.extension())
}
