//! Text renderer for coverage diffs.

use crate::coverage::render::INDENT;
use crate::diff::model::{Change, CoverageDiff, DiffEntry};
use colored::Colorize;

/// Options for [`render_diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRenderOptions {
    /// Also print fields whose whole subtree is unchanged
    pub all_fields: bool,
    pub color: bool,
}

impl Default for DiffRenderOptions {
    fn default() -> Self {
        Self {
            all_fields: false,
            color: true,
        }
    }
}

/// Render a diff as indented `key: old -> new` lines
///
/// Returns an empty string when nothing is left to show.
pub fn render_diff(diff: &CoverageDiff, options: &DiffRenderOptions) -> String {
    let mut out = String::new();
    for entry in &diff.entries {
        render_entry(&mut out, entry, 0, options);
    }
    out
}

fn render_entry(out: &mut String, entry: &DiffEntry, depth: usize, options: &DiffRenderOptions) {
    if !options.all_fields && !entry.has_changes() {
        return;
    }

    out.push_str(&INDENT.repeat(depth));
    out.push_str(&entry.key);
    out.push_str(": ");
    if entry.change.is_change() {
        let values = format!("{} -> {}", entry.old, entry.new);
        if options.color {
            out.push_str(&paint(&values, entry.change));
        } else {
            out.push_str(&values);
        }
    } else {
        out.push_str(&entry.old.to_string());
    }
    out.push('\n');

    for child in &entry.children {
        render_entry(out, child, depth + 1, options);
    }
}

fn paint(text: &str, change: Change) -> String {
    match change {
        Change::Unchanged => text.to_string(),
        Change::NewlyCovered | Change::Improved { critical: true } => {
            text.bright_green().to_string()
        }
        Change::LostCoverage | Change::Regressed { critical: true } => {
            text.bright_red().to_string()
        }
        Change::Regressed { critical: false } => text.bright_yellow().to_string(),
        Change::Improved { critical: false } => text.bright_blue().to_string(),
    }
}
