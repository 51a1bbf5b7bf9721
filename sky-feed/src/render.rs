//! Table output for composed rows

use libskyfeed::{DisplayRecord, EmbedVariant, TimestampStyle};

/// Output format for the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Jsonl,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Invalid format '{}'. Valid formats: text, json, jsonl, csv",
                s
            )),
        }
    }
}

pub const CSV_HEADER: &str =
    "row,author,reposted_by,reply_to,timestamp,embed,navigation_id,report_id,text";

/// Human-readable block for one row
pub fn text_row(
    index: usize,
    record: &DisplayRecord,
    style: &TimestampStyle,
    preview_chars: usize,
) -> String {
    let mut lines = Vec::new();

    if let Some(ref by) = record.reposted_by_handle {
        lines.push(format!("    Reposted by @{}", by));
    }
    lines.push(format!(
        "[{}] {} | @{}",
        index,
        style.render(record.timestamp),
        record.primary_author_handle
    ));
    if let Some(ref to) = record.reply_to_handle {
        lines.push(format!("    Reply to @{}", to));
    }
    if let Some(ref text) = record.body_text {
        lines.push(format!("    {}", preview(text, preview_chars)));
    }

    match &record.embed {
        EmbedVariant::Images { items } => {
            lines.push(format!("    [{} image(s)]", items.len()));
            for image in items {
                if image.alt.is_empty() {
                    lines.push(format!("      {}", image.fullsize_url));
                } else {
                    lines.push(format!("      {} ({})", image.fullsize_url, image.alt));
                }
            }
        }
        EmbedVariant::External(link) => {
            lines.push(format!("    [link] {}", link.title));
            if !link.description.is_empty() {
                lines.push(format!("      {}", preview(&link.description, preview_chars)));
            }
            lines.push(format!("      {}", link.uri));
        }
        EmbedVariant::None => {}
    }

    lines.push(format!("    View: {}", record.view_path()));
    lines.join("\n")
}

/// One CSV line, without trailing newline
pub fn csv_row(index: usize, record: &DisplayRecord) -> String {
    let timestamp = record
        .timestamp
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_default();

    [
        index.to_string(),
        quote(&record.primary_author_handle),
        quote(record.reposted_by_handle.as_deref().unwrap_or("")),
        quote(record.reply_to_handle.as_deref().unwrap_or("")),
        timestamp,
        embed_kind(&record.embed).to_string(),
        quote(&record.navigation_id),
        quote(&record.report_id),
        quote(record.body_text.as_deref().unwrap_or("")),
    ]
    .join(",")
}

fn embed_kind(embed: &EmbedVariant) -> &'static str {
    match embed {
        EmbedVariant::Images { .. } => "images",
        EmbedVariant::External(_) => "external",
        EmbedVariant::None => "none",
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Single-line preview truncated on character boundaries
fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > max_chars {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}
