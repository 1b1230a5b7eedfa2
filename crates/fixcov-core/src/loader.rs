//! Fixture content parsing.
//!
//! A fixture is either one JSON object, or a server-sent-events capture where
//! each `data:` line carries one JSON object. Lines without the prefix
//! (blank separators, `event:` lines) are ignored.

use crate::errors::{CoverageError, Result};
use crate::model::{Document, Part};
use serde_json::Value;

/// Prefix of tagged lines in streamed fixtures
pub const STREAM_LINE_PREFIX: &str = "data:";

/// Result of parsing one fixture.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// At least one part was extracted
    Parts(Document),
    /// Nothing could be extracted; the fixture is skipped
    NoData,
}

/// Parse raw fixture bytes into a document
///
/// `file` is only used for error context.
///
/// # Errors
///
/// `MalformedFixture` if the bytes are not UTF-8, a tagged line is not valid
/// JSON, or a parsed value is not a JSON object.
pub fn parse_document(file: &str, bytes: &[u8]) -> Result<ParseOutcome> {
    let text = std::str::from_utf8(bytes).map_err(|e| CoverageError::MalformedFixture {
        file: file.to_string(),
        reason: format!("not valid UTF-8: {}", e),
    })?;

    // Whole content as a single JSON value
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        let part = into_part(file, value, None)?;
        return Ok(ParseOutcome::Parts(Document::new(vec![part])));
    }

    // Streamed content, one part per tagged line
    let mut parts = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let Some(payload) = line.strip_prefix(STREAM_LINE_PREFIX) else {
            continue;
        };
        let value: Value =
            serde_json::from_str(payload.trim()).map_err(|e| CoverageError::MalformedFixture {
                file: file.to_string(),
                reason: format!("line {}: {}", index + 1, e),
            })?;
        parts.push(into_part(file, value, Some(index + 1))?);
    }

    if parts.is_empty() {
        return Ok(ParseOutcome::NoData);
    }
    Ok(ParseOutcome::Parts(Document::new(parts)))
}

fn into_part(file: &str, value: Value, line: Option<usize>) -> Result<Part> {
    match value {
        Value::Object(part) => Ok(part),
        other => {
            let location = line.map(|l| format!("line {}: ", l)).unwrap_or_default();
            Err(CoverageError::MalformedFixture {
                file: file.to_string(),
                reason: format!("{}expected a JSON object, found {}", location, kind_of(&other)),
            }
            .into())
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
