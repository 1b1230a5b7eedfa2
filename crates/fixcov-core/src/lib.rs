//! fixcov Core - schema coverage of recorded API response fixtures
//!
//! This crate provides the in-memory kernel of fixcov:
//! - Schema and document models (discovery-document schemas, streamed parts)
//! - Streaming fixture parsing (single JSON value or `data:` tagged lines)
//! - Response-type classification of fixtures
//! - The recursive Coverage Engine producing per-field hit counts
//! - The Coverage Differ comparing two coverage reports
//! - Text renderers for coverage trees and diffs
//!
//! All operations are synchronous and pure over already-loaded data. File
//! system and network access live in `fixcov-store`.

pub mod classify;
pub mod coverage;
pub mod diff;
pub mod errors;
pub mod loader;
pub mod logging_facility;
pub mod model;

// Used by the logging macros so callers need not depend on core-types directly
pub use fixcov_core_types;

// Re-export commonly used types
pub use classify::{classify_corpus, default_response_types, ClassifiedCorpus, ResponseType};
pub use coverage::{
    compute_coverage, compute_report, render_coverage, CoverageConfig, CoverageRenderOptions,
    CoverageRun, FieldTally,
};
pub use diff::{diff_reports, render_diff, CoverageDiff, DiffRenderOptions, ShapeMode};
pub use errors::{CoverageError, ExError, ExErrorKind, Result};
pub use loader::{parse_document, ParseOutcome};
pub use model::{Corpus, CoverageNode, CoverageReport, Document, SchemaSet};
