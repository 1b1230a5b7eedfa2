//! Coverage diff output types.

use crate::coverage::render::format_percent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A compared value: a hit count, or the overall percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Hits(u64),
    Percent(f64),
}

impl Measure {
    fn value(&self) -> f64 {
        match self {
            Measure::Hits(n) => *n as f64,
            Measure::Percent(p) => *p,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Hits(n) => write!(f, "{}", n),
            Measure::Percent(p) => write!(f, "{}%", format_percent(*p)),
        }
    }
}

/// Classification of one field's change.
///
/// `critical` is set for the overall percentage, whose regressions matter
/// more than any single field's.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Unchanged,
    /// Zero before, covered now
    NewlyCovered,
    /// Covered before, zero now
    LostCoverage,
    /// Fewer hits, but still covered
    Regressed { critical: bool },
    /// More hits than an already covered field had
    Improved { critical: bool },
}

impl Change {
    pub fn classify(old: Measure, new: Measure, critical: bool) -> Self {
        let (old, new) = (old.value(), new.value());
        if old == new {
            Change::Unchanged
        } else if old == 0.0 {
            Change::NewlyCovered
        } else if new == 0.0 {
            Change::LostCoverage
        } else if old > new {
            Change::Regressed { critical }
        } else {
            Change::Improved { critical }
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

/// One field of the diff tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEntry {
    pub key: String,
    pub old: Measure,
    pub new: Measure,
    pub change: Change,
    pub children: Vec<DiffEntry>,
}

impl DiffEntry {
    /// Whether this field or anything below it changed
    pub fn has_changes(&self) -> bool {
        self.change.is_change() || self.children.iter().any(DiffEntry::has_changes)
    }

    fn tally(&self, summary: &mut DiffSummary) {
        match self.change {
            Change::Unchanged => summary.unchanged += 1,
            Change::NewlyCovered => summary.newly_covered += 1,
            Change::LostCoverage => summary.lost_coverage += 1,
            Change::Regressed { .. } => summary.regressed += 1,
            Change::Improved { .. } => summary.improved += 1,
        }
        for child in &self.children {
            child.tally(summary);
        }
    }
}

/// The diff of two coverage reports: response types, then `Total Coverage`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoverageDiff {
    pub entries: Vec<DiffEntry>,
}

impl CoverageDiff {
    pub fn has_changes(&self) -> bool {
        self.entries.iter().any(DiffEntry::has_changes)
    }

    /// Find an entry by dotted path
    pub fn entry(&self, dotted: &str) -> Option<&DiffEntry> {
        let mut entries = &self.entries;
        let mut found = None;
        for segment in dotted.split('.') {
            let entry = entries.iter().find(|e| e.key == segment)?;
            entries = &entry.children;
            found = Some(entry);
        }
        found
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for entry in &self.entries {
            entry.tally(&mut summary);
        }
        summary
    }
}

/// Number of fields per classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub newly_covered: usize,
    pub lost_coverage: usize,
    pub regressed: usize,
    pub improved: usize,
}
