//! Recursive coverage computation.
//!
//! The corpus is viewed as a list of `(identifier, parts)` pairs. Descending
//! into a nested schema narrows each document's parts to the objects found
//! under the field being expanded, so a nested field counts a document iff
//! some object at that position carries it.

use crate::classify::{ClassifiedCorpus, ResponseType};
use crate::coverage::config::CoverageConfig;
use crate::coverage::tally::FieldTally;
use crate::errors::{CoverageError, Result};
use crate::model::{Corpus, CoverageNode, CoverageReport, Nesting, Part, SchemaSet};
use crate::{log_op_end, log_op_error, log_op_start};
use fixcov_core_types::TOTAL_KEY;
use indexmap::IndexMap;
use serde_json::Value;
use std::time::Instant;

/// One document as seen at the current depth: identifier and its parts
type DocumentView<'a> = (&'a str, Vec<&'a Part>);

/// Result of a full coverage run.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRun {
    pub report: CoverageReport,
    pub tally: FieldTally,
}

/// Compute the coverage of every field reachable from `schema_name`
///
/// Returns the field nodes (the children of the schema's own node) and the
/// tally of the fields counted.
///
/// # Errors
///
/// - `UnknownSchema` if `schema_name` or a reachable `$ref` is missing
/// - `RecursionLimit` if nesting exceeds `config.max_depth`
pub fn compute_coverage(
    schemas: &SchemaSet,
    schema_name: &str,
    corpus: &Corpus,
    config: &CoverageConfig,
) -> Result<(IndexMap<String, CoverageNode>, FieldTally)> {
    let start = Instant::now();
    log_op_start!(
        "compute_coverage",
        schema = schema_name,
        document_count = corpus.len()
    );

    let documents = document_views(corpus);
    let mut walker = CoverageWalker::new(schemas, config);
    let result = walker.walk(schema_name, &documents);
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(children) => {
            let tally = walker.tally;
            log_op_end!(
                "compute_coverage",
                duration_ms = duration_ms,
                covered = tally.covered,
                total = tally.total
            );
            Ok((children, tally))
        }
        Err(err) => {
            log_op_error!("compute_coverage", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}

/// Compute the full report over every response type
///
/// Each response type becomes a root node whose count is the number of its
/// documents. The overall percentage is taken once, after all response
/// types have been traversed.
///
/// # Errors
///
/// Propagates [`compute_coverage`] errors.
pub fn compute_report(
    schemas: &SchemaSet,
    classified: &ClassifiedCorpus,
    response_types: &[ResponseType],
    config: &CoverageConfig,
) -> Result<CoverageRun> {
    let start = Instant::now();
    log_op_start!(
        "compute_report",
        response_types = response_types.len(),
        document_count = classified.document_count()
    );

    let empty = Corpus::new();
    let mut roots = IndexMap::new();
    let mut tally = FieldTally::new();

    for response_type in response_types {
        let corpus = classified.documents(&response_type.name).unwrap_or(&empty);
        let (children, type_tally) =
            match compute_coverage(schemas, &response_type.schema, corpus, config) {
                Ok(computed) => computed,
                Err(err) => {
                    let duration_ms = start.elapsed().as_millis() as u64;
                    log_op_error!("compute_report", err.clone(), duration_ms = duration_ms);
                    return Err(err);
                }
            };
        tally.absorb(type_tally);

        let mut root = CoverageNode::new(corpus.len() as u64);
        if config.list_files {
            root = root.with_files(corpus.keys().cloned().collect());
        }
        root.children = children;
        roots.insert(response_type.name.clone(), root);
    }

    let report = CoverageReport {
        roots,
        total_percent: tally.percent(),
    };

    log_op_end!(
        "compute_report",
        duration_ms = start.elapsed().as_millis() as u64,
        covered = tally.covered,
        total = tally.total,
        percent = report.total_percent
    );
    tracing::debug!(key = TOTAL_KEY, percent = report.total_percent, "coverage computed");

    Ok(CoverageRun { report, tally })
}

fn document_views(corpus: &Corpus) -> Vec<DocumentView<'_>> {
    corpus
        .iter()
        .map(|(id, document)| (id.as_str(), document.parts().iter().collect()))
        .collect()
}

/// Depth-first traversal state for one run.
struct CoverageWalker<'a> {
    schemas: &'a SchemaSet,
    config: &'a CoverageConfig,
    tally: FieldTally,
    /// Schemas currently being expanded, outermost first
    chain: Vec<&'a str>,
    /// Field names from the root to the current field
    path: Vec<&'a str>,
}

impl<'a> CoverageWalker<'a> {
    fn new(schemas: &'a SchemaSet, config: &'a CoverageConfig) -> Self {
        Self {
            schemas,
            config,
            tally: FieldTally::new(),
            chain: Vec::new(),
            path: Vec::new(),
        }
    }

    fn walk(
        &mut self,
        schema_name: &'a str,
        documents: &[DocumentView<'a>],
    ) -> Result<IndexMap<String, CoverageNode>> {
        if self.chain.len() >= self.config.max_depth {
            return Err(CoverageError::RecursionLimit {
                path: self.dotted_path(),
                max_depth: self.config.max_depth,
            }
            .into());
        }
        let schema = self
            .schemas
            .get(schema_name)
            .map_err(|e| e.with_field_path(self.dotted_path()))?;

        self.chain.push(schema_name);
        let mut output = IndexMap::new();

        for (field, descriptor) in &schema.properties {
            if self.config.is_ignored(field) {
                continue;
            }
            self.path.push(field);

            let mut node = self.count(documents, |part| part.contains_key(field.as_str()));

            for value in descriptor.enum_values() {
                let child = self.count(documents, |part| {
                    matches!(part.get(field.as_str()), Some(Value::String(s)) if s == value)
                });
                node.children.insert(value.clone(), child);
            }

            if let Some(nesting) = descriptor.nesting() {
                let nested = nesting.schema_name();
                if self.chain.contains(&nested) {
                    tracing::trace!(
                        field_path = %self.dotted_path(),
                        schema = nested,
                        "back edge to a schema being expanded; not expanded"
                    );
                } else {
                    let narrowed = narrow(documents, field, nesting);
                    for (name, child) in self.walk(nested, &narrowed)? {
                        if node.children.contains_key(&name) {
                            return Err(CoverageError::FieldCollision {
                                path: self.dotted_path(),
                                name,
                            }
                            .into());
                        }
                        node.children.insert(name, child);
                    }
                }
            }

            output.insert(field.clone(), node);
            self.path.pop();
        }

        self.chain.pop();
        Ok(output)
    }

    /// Count the documents having a part that satisfies `predicate`
    fn count<F>(&mut self, documents: &[DocumentView<'a>], predicate: F) -> CoverageNode
    where
        F: Fn(&Part) -> bool,
    {
        let hits: Vec<&str> = documents
            .iter()
            .filter(|(_, parts)| parts.iter().any(|part| predicate(part)))
            .map(|(id, _)| *id)
            .collect();
        self.tally.record(!hits.is_empty());

        let node = CoverageNode::new(hits.len() as u64);
        if self.config.list_files {
            node.with_files(hits.into_iter().map(str::to_string).collect())
        } else {
            node
        }
    }

    fn dotted_path(&self) -> String {
        let mut segments: Vec<&str> = self.chain.first().copied().into_iter().collect();
        segments.extend(self.path.iter().copied());
        segments.join(".")
    }
}

/// Narrow every document to the objects found under `field`
///
/// Documents left without parts are dropped; they cannot reach any nested
/// field. Values that are not objects are dropped too.
fn narrow<'a>(
    documents: &[DocumentView<'a>],
    field: &str,
    nesting: Nesting<'_>,
) -> Vec<DocumentView<'a>> {
    documents
        .iter()
        .filter_map(|(id, parts)| {
            let nested: Vec<&'a Part> = parts
                .iter()
                .flat_map(|part| nested_parts(part.get(field), nesting))
                .collect();
            (!nested.is_empty()).then_some((*id, nested))
        })
        .collect()
}

fn nested_parts<'a>(value: Option<&'a Value>, nesting: Nesting<'_>) -> Vec<&'a Part> {
    match (nesting, value) {
        (Nesting::Object(_), Some(Value::Object(object))) => vec![object],
        (Nesting::Array(_), Some(Value::Array(items))) => {
            items.iter().filter_map(Value::as_object).collect()
        }
        _ => Vec::new(),
    }
}
