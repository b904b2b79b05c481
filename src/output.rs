//! CLI output formatting.
//!
//! Each display has a `format_*` function returning lines (pure, testable)
//! and, where the CLI needs it, a `print_*` wrapper that writes to stdout.
//!
//! ## Run
//!
//! ```text
//! Found 5 item images and 1 info images
//! Total to process: 6
//! Batch 001: a.jpg, b.jpg, c.jpg, d.jpg, e.jpg
//!     Failed b.jpg: HTTP 404 for https://data.palavara.com/img/b.jpg
//! Batch 002: portrait.jpg
//! Done. Written to mock-data/data.json
//!     6 placeholders: 5 ok, 1 failed
//!     Updated 5 items, 1 info section
//!     Failed: b.jpg
//! ```
//!
//! ## Check
//!
//! ```text
//! Item images (5)
//! 001 a.jpg
//! 002 b.jpg
//! Info images (1)
//! 001 portrait.jpg
//! ```

use crate::pipeline::RunSummary;
use crate::process::ProcessEvent;
use crate::scan::ScannedIds;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize a count with a noun.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format a single process event as display lines.
///
/// Successful placeholders are silent; failures carry identifier and message
/// so one image can be tracked down without rerunning verbosely.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::ScanCompleted {
            item_images,
            info_images,
            total,
        } => vec![
            format!("Found {item_images} item images and {info_images} info images"),
            format!("Total to process: {total}"),
        ],
        ProcessEvent::BatchStarted {
            number,
            identifiers,
        } => vec![format!(
            "Batch {}: {}",
            format_index(*number),
            identifiers.join(", ")
        )],
        ProcessEvent::PlaceholderReady { .. } => Vec::new(),
        ProcessEvent::PlaceholderFailed {
            identifier,
            message,
        } => vec![format!("{}Failed {}: {}", indent(1), identifier, message)],
    }
}

/// Format the final summary of a completed run.
pub fn format_run_summary(summary: &RunSummary) -> Vec<String> {
    let failed = summary.failed.len();
    let ok = summary.processed - failed;
    let mut lines = vec![
        format!("Done. Written to {}", summary.data_path.display()),
        format!(
            "{}{}: {} ok, {} failed",
            indent(1),
            count(summary.processed, "placeholder", "placeholders"),
            ok,
            failed
        ),
        format!(
            "{}Updated {}, {}",
            indent(1),
            count(summary.inject.items_updated, "item", "items"),
            count(
                summary.inject.sections_updated,
                "info section",
                "info sections"
            )
        ),
    ];
    if !summary.failed.is_empty() {
        lines.push(format!(
            "{}Failed: {}",
            indent(1),
            summary.failed.join(", ")
        ));
    }
    lines
}

pub fn print_run_summary(summary: &RunSummary) {
    for line in format_run_summary(summary) {
        println!("{}", line);
    }
}

/// Format the identifier listing shown by `check`.
pub fn format_check_output(ids: &ScannedIds) -> Vec<String> {
    let mut lines = vec![format!("Item images ({})", ids.file_names.len())];
    for (i, name) in ids.file_names.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), name));
    }
    lines.push(format!("Info images ({})", ids.image_ids.len()));
    for (i, id) in ids.image_ids.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), id));
    }
    lines.push(format!(
        "Total to process: {}",
        ids.processing_list().len()
    ));
    lines
}

pub fn print_check_output(ids: &ScannedIds) {
    for line in format_check_output(ids) {
        println!("{}", line);
    }
}
