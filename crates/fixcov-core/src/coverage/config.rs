//! Engine configuration.

use std::collections::BTreeSet;

/// Recursion depth (nested schemas) after which traversal fails
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Immutable settings for one coverage run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageConfig {
    /// Field names skipped at every depth, with their whole subtree
    pub ignored_fields: BTreeSet<String>,
    /// Record contributing file identifiers on every node
    pub list_files: bool,
    /// Maximum number of nested schemas on the traversal chain
    pub max_depth: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            ignored_fields: BTreeSet::new(),
            list_files: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CoverageConfig {
    pub fn with_ignored_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_list_files(mut self, list_files: bool) -> Self {
        self.list_files = list_files;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored_fields.contains(field)
    }
}
