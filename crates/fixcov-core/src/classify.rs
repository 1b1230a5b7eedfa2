//! Response-type classification of fixtures.
//!
//! A fixture belongs to the first response type (in declared order) whose
//! schema structurally accepts its first part: every key of the part is a
//! property of the schema, and object values of `$ref` properties are
//! accepted by the referenced schema in turn.
//!
//! Fixtures matching no response type are fatal. All of them are collected
//! before failing so a single run reports every offender.

use crate::errors::{CoverageError, Result};
use crate::model::{Corpus, Part, Schema, SchemaSet};
use crate::{log_op_end, log_op_error, log_op_start};
use indexmap::IndexMap;
use serde_json::Value;
use std::time::Instant;

/// Schema name prefix used by the Vertex AI discovery document
pub const DEFAULT_SCHEMA_PREFIX: &str = "GoogleCloudAiplatformV1beta1";

/// Response types evaluated by default, in classification priority order
pub const DEFAULT_RESPONSE_TYPES: &[&str] = &["GenerateContentResponse", "CountTokensResponse"];

/// A top-level response kind and the schema describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseType {
    /// Display name, used as the report key
    pub name: String,
    /// Schema name in the schema set
    pub schema: String,
}

impl ResponseType {
    pub fn new(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
        }
    }

    /// Response type whose schema is `prefix` + `name`
    pub fn prefixed(prefix: &str, name: &str) -> Self {
        Self::new(name, format!("{}{}", prefix, name))
    }
}

/// The default response types under the given schema prefix
pub fn default_response_types(prefix: &str) -> Vec<ResponseType> {
    DEFAULT_RESPONSE_TYPES
        .iter()
        .map(|name| ResponseType::prefixed(prefix, name))
        .collect()
}

/// Fixtures grouped by response type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedCorpus {
    /// Response type name → its fixtures, in response type order
    pub by_type: IndexMap<String, Corpus>,
    /// Error fixtures, excluded from coverage
    pub error_fixtures: Vec<String>,
}

impl ClassifiedCorpus {
    /// Fixtures of one response type (empty if none)
    pub fn documents(&self, response_type: &str) -> Option<&Corpus> {
        self.by_type.get(response_type)
    }

    pub fn document_count(&self) -> usize {
        self.by_type.values().map(Corpus::len).sum()
    }
}

/// Check whether a part is structurally an instance of `schema`
///
/// # Errors
///
/// `UnknownSchema` if a `$ref` on the checked path names a missing schema.
pub fn is_response_type(schemas: &SchemaSet, part: &Part, schema: &Schema) -> Result<bool> {
    for (field, value) in part {
        let Some(descriptor) = schema.properties.get(field) else {
            return Ok(false);
        };
        if let Some(reference) = &descriptor.reference {
            let Value::Object(nested) = value else {
                return Ok(false);
            };
            if !is_response_type(schemas, nested, schemas.get(reference)?)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Group a corpus by response type
///
/// # Errors
///
/// - `UnknownSchema` if a response type's schema is missing
/// - `UnclassifiedFixture` listing every fixture that matched no response
///   type and is not an error fixture
pub fn classify_corpus(
    schemas: &SchemaSet,
    response_types: &[ResponseType],
    corpus: Corpus,
) -> Result<ClassifiedCorpus> {
    let start = Instant::now();
    log_op_start!("classify_corpus", document_count = corpus.len());

    let result = classify_inner(schemas, response_types, corpus);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(classified) => {
            log_op_end!(
                "classify_corpus",
                duration_ms = duration_ms,
                document_count = classified.document_count(),
                error_fixtures = classified.error_fixtures.len()
            );
        }
        Err(err) => {
            log_op_error!("classify_corpus", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn classify_inner(
    schemas: &SchemaSet,
    response_types: &[ResponseType],
    corpus: Corpus,
) -> Result<ClassifiedCorpus> {
    let resolved: Vec<(&ResponseType, &Schema)> = response_types
        .iter()
        .map(|rt| schemas.get(&rt.schema).map(|schema| (rt, schema)))
        .collect::<Result<_>>()?;

    let mut classified = ClassifiedCorpus {
        by_type: response_types
            .iter()
            .map(|rt| (rt.name.clone(), Corpus::new()))
            .collect(),
        error_fixtures: Vec::new(),
    };
    let mut unmatched = Vec::new();

    for (file, document) in corpus {
        let mut matches = Vec::new();
        if let Some(first) = document.first_part() {
            for (rt, schema) in &resolved {
                if is_response_type(schemas, first, schema)? {
                    matches.push(rt.name.as_str());
                }
            }
        }

        match matches.as_slice() {
            [] if document.is_error_fixture() => {
                tracing::debug!(file = %file, "error fixture excluded from coverage");
                classified.error_fixtures.push(file);
            }
            [] => {
                tracing::warn!(file = %file, "fixture does not match any response type");
                unmatched.push(file);
            }
            [chosen, others @ ..] => {
                if !others.is_empty() {
                    tracing::warn!(
                        file = %file,
                        response_type = %chosen,
                        also_matches = ?others,
                        "fixture matches several response types; using the first"
                    );
                }
                let chosen = chosen.to_string();
                if let Some(group) = classified.by_type.get_mut(&chosen) {
                    group.insert(file, document);
                }
            }
        }
    }

    if !unmatched.is_empty() {
        return Err(CoverageError::UnclassifiedFixtures { files: unmatched }.into());
    }
    Ok(classified)
}
