//! Lockstep walk of two coverage trees.

use crate::diff::model::{Change, CoverageDiff, DiffEntry, Measure};
use crate::errors::{CoverageError, Result};
use crate::model::{CoverageNode, CoverageReport};
use crate::{log_op_end, log_op_error, log_op_start};
use fixcov_core_types::TOTAL_KEY;
use indexmap::IndexMap;
use std::time::Instant;

/// How differing key sets are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShapeMode {
    /// Key sets must match at every node
    #[default]
    Strict,
    /// Walk the union of keys; a missing side counts as zero
    Lenient,
}

/// Diff two coverage reports
///
/// # Errors
///
/// `ShapeMismatch` in [`ShapeMode::Strict`] when a node has keys on only one
/// side. The error names the dotted path of that node.
pub fn diff_reports(
    old: &CoverageReport,
    new: &CoverageReport,
    mode: ShapeMode,
) -> Result<CoverageDiff> {
    let start = Instant::now();
    log_op_start!("diff_reports", mode = ?mode);

    let mut path = Vec::new();
    let mut entries = match diff_children(&old.roots, &new.roots, &mut path, mode) {
        Ok(entries) => entries,
        Err(err) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log_op_error!("diff_reports", err.clone(), duration_ms = duration_ms);
            return Err(err);
        }
    };

    let (old_total, new_total) = (
        Measure::Percent(old.total_percent),
        Measure::Percent(new.total_percent),
    );
    entries.push(DiffEntry {
        key: TOTAL_KEY.to_string(),
        old: old_total,
        new: new_total,
        change: Change::classify(old_total, new_total, true),
        children: Vec::new(),
    });

    let diff = CoverageDiff { entries };
    let summary = diff.summary();
    log_op_end!(
        "diff_reports",
        duration_ms = start.elapsed().as_millis() as u64,
        newly_covered = summary.newly_covered,
        lost_coverage = summary.lost_coverage,
        regressed = summary.regressed,
        improved = summary.improved
    );
    Ok(diff)
}

fn diff_children(
    old: &IndexMap<String, CoverageNode>,
    new: &IndexMap<String, CoverageNode>,
    path: &mut Vec<String>,
    mode: ShapeMode,
) -> Result<Vec<DiffEntry>> {
    let keys = match mode {
        ShapeMode::Strict => strict_keys(old, new, path)?,
        ShapeMode::Lenient => old
            .keys()
            .chain(new.keys().filter(|k| !old.contains_key(*k)))
            .collect(),
    };

    let empty = IndexMap::new();
    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let (old_node, new_node) = (old.get(key), new.get(key));
        let old_hits = Measure::Hits(old_node.map_or(0, |n| n.hits));
        let new_hits = Measure::Hits(new_node.map_or(0, |n| n.hits));

        path.push(key.clone());
        let children = diff_children(
            old_node.map_or(&empty, |n| &n.children),
            new_node.map_or(&empty, |n| &n.children),
            path,
            mode,
        )?;
        path.pop();

        entries.push(DiffEntry {
            key: key.clone(),
            old: old_hits,
            new: new_hits,
            change: Change::classify(old_hits, new_hits, false),
            children,
        });
    }
    Ok(entries)
}

fn strict_keys<'a>(
    old: &'a IndexMap<String, CoverageNode>,
    new: &IndexMap<String, CoverageNode>,
    path: &[String],
) -> Result<Vec<&'a String>> {
    let only_in_old: Vec<String> = old
        .keys()
        .filter(|k| !new.contains_key(*k))
        .cloned()
        .collect();
    let only_in_new: Vec<String> = new
        .keys()
        .filter(|k| !old.contains_key(*k))
        .cloned()
        .collect();

    if only_in_old.is_empty() && only_in_new.is_empty() {
        return Ok(old.keys().collect());
    }
    let path = if path.is_empty() {
        "(top level)".to_string()
    } else {
        path.join(".")
    };
    Err(CoverageError::ShapeMismatch {
        path,
        only_in_old,
        only_in_new,
    }
    .into())
}
