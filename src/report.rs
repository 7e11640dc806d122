//! Format a packing summary as text or JSON.

use crate::container::Container;
use crate::driver::{PackSummary, StopReason};
use crate::error::ApiError;
use crate::types::{ByteSize, RejectReason};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{CellAlignment, Table};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// JSON shape of a packing summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub generated_at: String,
    pub target_size: u64,
    pub granularity: u64,
    pub set_count: usize,
    pub sets: Vec<SetReport>,
    pub pending: PendingReport,
    pub rejected: Vec<RejectedReport>,
    pub stop_reason: String,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetReport {
    pub index: usize,
    pub item_count: usize,
    pub size: ByteSize,
    pub remaining: u64,
    pub items: Vec<ItemReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: String,
    pub size: ByteSize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReport {
    pub count: usize,
    pub bytes: ByteSize,
    pub items: Vec<ItemReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedReport {
    pub id: String,
    pub size: ByteSize,
    pub reason: RejectReason,
    pub message: String,
}

impl SummaryReport {
    pub fn from_summary(summary: &PackSummary) -> Self {
        let sets = summary
            .sets
            .iter()
            .enumerate()
            .map(|(i, set)| SetReport {
                index: i + 1,
                item_count: set.len(),
                size: set.size(),
                remaining: set.remaining(),
                items: set
                    .items()
                    .iter()
                    .map(|item| ItemReport {
                        id: item.id.clone(),
                        size: item.size,
                    })
                    .collect(),
            })
            .collect();

        SummaryReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            target_size: summary.target_size,
            granularity: summary.granularity,
            set_count: summary.sets.len(),
            sets,
            pending: PendingReport {
                count: summary.pending.len(),
                bytes: summary.pending_bytes(),
                items: summary
                    .pending
                    .iter()
                    .map(|item| ItemReport {
                        id: item.id.clone(),
                        size: item.size,
                    })
                    .collect(),
            },
            rejected: summary
                .rejected
                .iter()
                .map(|r| RejectedReport {
                    id: r.item.id.clone(),
                    size: r.item.size,
                    reason: r.reason,
                    message: r.to_error(summary.target_size).to_string(),
                })
                .collect(),
            stop_reason: stop_reason_label(summary.stop_reason).to_string(),
            skipped: summary.scan_skipped,
        }
    }
}

fn stop_reason_label(reason: StopReason) -> &'static str {
    match reason {
        StopReason::Drained => "drained",
        StopReason::SetLimit => "set_limit",
        StopReason::Stalled => "stalled",
    }
}

/// Format a section heading; bold/underline only when `color` is set.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Human-readable size: bytes / KB / MB / GB, with the KB figure truncated.
pub fn format_size(size: ByteSize) -> String {
    let kb = size / 1024;
    let mb = kb as f64 / 1024.0;
    let gb = mb / 1024.0;
    format!("{} bytes / {} KB / {:.2} MB / {:.2} GB", size, kb, mb, gb)
}

fn format_set(index: usize, set: &Container, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format_section_heading(&format!("Set {}", index), color)
    ));
    out.push_str(&format!(
        "  Files ({}, {})\n",
        set.len(),
        format_size(set.size())
    ));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Size", "Path"]);
    for item in set.items() {
        table.add_row(vec![item.size.to_string(), item.id.clone()]);
    }
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Format a packing summary as text.
pub fn format_summary_text(summary: &PackSummary, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("File sets ({})", summary.sets.len()), color)
    ));
    let target = ByteSize::try_from(summary.target_size).unwrap_or(ByteSize::MAX);
    out.push_str(&format!("  Target size: {}\n", format_size(target)));
    out.push_str(&format!("  Bucket size: {} bytes\n\n", summary.granularity));

    if summary.sets.is_empty() {
        out.push_str("No sets produced.\n\n");
    }
    for (i, set) in summary.sets.iter().enumerate() {
        out.push_str(&format_set(i + 1, set, color));
        out.push('\n');
    }

    if !summary.pending.is_empty() {
        out.push_str(&format!("{}\n", format_section_heading("Not placed", color)));
        out.push_str(&format!(
            "  {} files left, {}\n",
            summary.pending.len(),
            format_size(summary.pending_bytes())
        ));
        for item in &summary.pending {
            out.push_str(&format!("  {}  {}\n", item.size, item.id));
        }
        out.push('\n');
    }

    if !summary.rejected.is_empty() {
        out.push_str(&format!("{}\n", format_section_heading("Rejected", color)));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Size", "Reason", "Path"]);
        for r in &summary.rejected {
            table.add_row(vec![
                r.item.size.to_string(),
                r.reason.to_string(),
                r.item.id.clone(),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    out.push_str(&format!(
        "Total: {} sets, {} files placed, {}.\n",
        summary.sets.len(),
        summary.placed_items(),
        format_size(summary.placed_bytes())
    ));
    match summary.stop_reason {
        StopReason::SetLimit => out.push_str("Stopped at the requested number of sets.\n"),
        StopReason::Stalled => out.push_str(&format!(
            "Stopped early: {} files could not be placed in a new set.\n",
            summary.pending.len()
        )),
        StopReason::Drained => {}
    }
    if summary.scan_skipped > 0 {
        out.push_str(&format!(
            "Skipped {} unreadable entries while scanning.\n",
            summary.scan_skipped
        ));
    }
    out
}

/// Format a packing summary as pretty-printed JSON.
pub fn format_summary_json(summary: &PackSummary) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&SummaryReport::from_summary(
        summary,
    ))?)
}
