//! Text rendering of coverage trees.
//!
//! One line per node, `key: count`, indented with one `| ` per depth level.
//! With color enabled, zero-count nodes are red, and the indentation bars of
//! everything below a red node are drawn red as well.

use crate::model::{CoverageNode, CoverageReport};
use colored::Colorize;
use fixcov_core_types::TOTAL_KEY;

/// Depth marker prepended once per nesting level
pub const INDENT: &str = "| ";

/// Options for [`render_coverage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageRenderOptions {
    pub color: bool,
}

impl Default for CoverageRenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Render a full report, ending with the `Total Coverage` line
pub fn render_coverage(report: &CoverageReport, options: &CoverageRenderOptions) -> String {
    let mut lines = Vec::new();
    for (key, root) in &report.roots {
        render_node(&mut lines, key, root, 0, 0, options);
    }
    let total = format!("{}: {}%", TOTAL_KEY, format_percent(report.total_percent));
    if options.color && report.total_percent == 0.0 {
        lines.push(total.bright_red().to_string());
    } else {
        lines.push(total);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_node(
    lines: &mut Vec<String>,
    key: &str,
    node: &CoverageNode,
    depth: usize,
    red_depth: usize,
    options: &CoverageRenderOptions,
) {
    let mut text = format!("{}: {}", key, node.hits);
    if let Some(files) = node.files.as_ref().filter(|f| !f.is_empty()) {
        text.push_str(&format!(" [{}]", files.join(", ")));
    }

    let red = options.color && node.hits == 0;
    let plain_bars = INDENT.repeat(depth - red_depth);
    let red_bars = INDENT.repeat(red_depth);
    if red {
        lines.push(format!(
            "{}{}",
            plain_bars,
            format!("{}{}", red_bars, text).bright_red()
        ));
    } else {
        lines.push(format!("{}{}{}", plain_bars, red_bars, text));
    }

    for (child_key, child) in &node.children {
        render_node(
            lines,
            child_key,
            child,
            depth + 1,
            red_depth + usize::from(red),
            options,
        );
    }
}

/// Format a percentage the way reports display it: always with a fraction
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
