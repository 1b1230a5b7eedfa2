//! fixcov Store - file system and network collaborators
//!
//! Provides:
//! - Fixture discovery, exclusion and scan-file selection
//! - Fixture loading into a corpus, with per-file failure reporting
//! - Schema document sources (local file, URL with optional cache)
//! - Coverage report files in JSON or YAML

pub mod errors;
pub mod fixtures;
pub mod report_io;
pub mod schema_source;

// Re-export key types
pub use errors::Result;
pub use fixtures::{list_fixtures, load_corpus, load_fixtures, FixtureSelection, LoadedCorpus};
pub use report_io::{read_report, report_to_string, write_report, ReportFormat};
pub use schema_source::{SchemaSource, DEFAULT_DISCOVERY_URL};
