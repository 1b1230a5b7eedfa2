//! Keywords of the serialized coverage report.
//!
//! A report is a tree of objects. Every node carries [`NUM_KEY`] and, when
//! file listing was requested, [`FILES_KEY`]. All other keys of a node are
//! child field names. The root additionally holds the [`TOTAL_KEY`] entry
//! whose [`NUM_KEY`] is the overall coverage percentage.

/// Hit count of a node (or the percentage, for the total entry).
pub const NUM_KEY: &str = "_coverage_num";

/// Identifiers of the fixtures that contributed to a node's hit count.
pub const FILES_KEY: &str = "_coverage_files";

/// Root entry holding the overall coverage percentage.
pub const TOTAL_KEY: &str = "Total Coverage";

/// Returns true if `key` is one of the reserved node keywords rather than a
/// child field name.
pub fn is_reserved(key: &str) -> bool {
    key == NUM_KEY || key == FILES_KEY
}
