//! Error handling for fixcov-store
//!
//! Wraps fixcov-core ExError with store-specific helpers

use fixcov_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a path
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_file(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a missing input file error
pub fn missing_file(operation: &str, path: &Path) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_file(path.display().to_string())
        .with_message(format!("File {} does not exist.", path.display()))
}

/// Create an invalid glob pattern error
pub fn invalid_pattern(pattern: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("expand_pattern")
        .with_message(format!("Invalid pattern {}: {}", pattern, reason))
}

/// Create an error for a pattern that matched nothing
pub fn no_matches(pattern: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("expand_pattern")
        .with_message(format!("No matching files found for pattern: {}", pattern))
}

/// Create a schema download error
pub fn schema_fetch(url: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::ExternalService)
        .with_op("fetch_schema_document")
        .with_message(format!("Failed to fetch {}: {}", url, reason))
}

/// Create a schema document parse error
pub fn schema_parse(source: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidSchema)
        .with_op("load_schema_document")
        .with_file(source.to_string())
        .with_message(reason.to_string())
}

/// Create a coverage report parse error
pub fn report_parse(path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidReport)
        .with_op("read_report")
        .with_file(path.display().to_string())
        .with_message(reason.to_string())
}

/// Create a coverage report serialization error
pub fn report_serialize(reason: &str) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("write_report")
        .with_message(reason.to_string())
}
