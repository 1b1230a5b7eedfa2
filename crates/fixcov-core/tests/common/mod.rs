#![allow(dead_code)]

use fixcov_core::model::{Corpus, Document, PropertyDescriptor, Schema, SchemaSet};
use serde_json::Value;
use std::collections::BTreeMap;

/// Build a schema set from `(name, [(field, descriptor)])` entries
pub fn schema_set(entries: &[(&str, Vec<(&str, PropertyDescriptor)>)]) -> SchemaSet {
    let mut schemas = BTreeMap::new();
    for (name, props) in entries {
        let properties = props
            .iter()
            .map(|(field, d)| (field.to_string(), d.clone()))
            .collect();
        schemas.insert(name.to_string(), Schema { properties });
    }
    SchemaSet::from_schemas(schemas)
}

/// Single-part documents keyed by file name
pub fn corpus(entries: &[(&str, Value)]) -> Corpus {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), Document::from_value(value.clone())))
        .collect()
}

/// Multi-part (streamed) document
pub fn streamed(parts: &[Value]) -> Document {
    Document::new(
        parts
            .iter()
            .map(|p| p.as_object().cloned().unwrap_or_default())
            .collect(),
    )
}

/// A small response-like schema graph used across suites
pub fn response_schemas() -> SchemaSet {
    schema_set(&[
        (
            "Response",
            vec![
                ("candidates", PropertyDescriptor::array_of("Candidate")),
                ("modelVersion", PropertyDescriptor::scalar()),
                ("usageMetadata", PropertyDescriptor::reference("Usage")),
            ],
        ),
        (
            "Candidate",
            vec![
                ("content", PropertyDescriptor::reference("Content")),
                (
                    "finishReason",
                    PropertyDescriptor::enumeration(["STOP", "MAX_TOKENS", "SAFETY"]),
                ),
                ("index", PropertyDescriptor::scalar()),
            ],
        ),
        (
            "Content",
            vec![
                ("parts", PropertyDescriptor::array_of("Part")),
                ("role", PropertyDescriptor::scalar()),
            ],
        ),
        ("Part", vec![("text", PropertyDescriptor::scalar())]),
        (
            "Usage",
            vec![
                ("candidatesTokenCount", PropertyDescriptor::scalar()),
                ("promptTokenCount", PropertyDescriptor::scalar()),
            ],
        ),
        ("Count", vec![("totalTokens", PropertyDescriptor::scalar())]),
    ])
}
