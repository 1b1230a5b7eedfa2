//! Fixture documents.
//!
//! A document is the ordered list of parts recorded for one response. Plain
//! fixtures have exactly one part; streamed fixtures have one part per chunk.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One increment of a (possibly streamed) response: field name → value.
pub type Part = Map<String, Value>;

/// Fixture identifier → document, ordered by identifier.
pub type Corpus = BTreeMap<String, Document>;

/// A response fixture as an ordered sequence of parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    parts: Vec<Part>,
}

impl Document {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Convenience for a single-part document built from a JSON object.
    ///
    /// Non-object values produce an empty document.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(part) => Self::new(vec![part]),
            _ => Self::default(),
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn first_part(&self) -> Option<&Part> {
        self.parts.first()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn is_streaming(&self) -> bool {
        self.parts.len() > 1
    }

    /// An error fixture is a single part whose only key is `error`.
    ///
    /// These record failed calls and are not expected to match any
    /// response type.
    pub fn is_error_fixture(&self) -> bool {
        match self.parts.as_slice() {
            [only] => only.len() == 1 && only.contains_key("error"),
            _ => false,
        }
    }
}
