//! Coverage engine scenarios: enum, reference and array facets, ignored
//! fields, streamed documents, cyclic schemas and full reports over
//! classified corpora.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{corpus, response_schemas, schema_set, streamed};
use fixcov_core::classify::{classify_corpus, ResponseType};
use fixcov_core::coverage::{compute_coverage, compute_report, CoverageConfig};
use fixcov_core::diff::{diff_reports, ShapeMode};
use fixcov_core::model::{Corpus, CoverageNode, CoverageReport, PropertyDescriptor, SchemaSet};
use serde_json::json;

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

#[test]
fn test_enum_values_counted_individually() {
    let schemas = schema_set(&[(
        "R",
        vec![("status", PropertyDescriptor::enumeration(["OK", "FAIL"]))],
    )]);
    let docs = corpus(&[("a.json", json!({"status": "OK"})), ("b.json", json!({}))]);

    let (tree, tally) = compute_coverage(&schemas, "R", &docs, &CoverageConfig::default()).unwrap();

    let status = &tree["status"];
    assert_eq!(status.hits, 1);
    assert_eq!(status.children["OK"].hits, 1);
    assert_eq!(status.children["FAIL"].hits, 0);
    assert_eq!(tally.total, 3);
    assert_eq!(tally.covered, 2);
}

#[test]
fn test_enum_values_keep_declared_order() {
    let schemas = schema_set(&[(
        "R",
        vec![("s", PropertyDescriptor::enumeration(["ZETA", "ALPHA", "MID"]))],
    )]);
    let (tree, _) =
        compute_coverage(&schemas, "R", &Corpus::new(), &CoverageConfig::default()).unwrap();
    let keys: Vec<&str> = tree["s"].children.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["ZETA", "ALPHA", "MID"]);
}

#[test]
fn test_reference_descends_into_nested_schema() {
    let schemas = schema_set(&[
        ("Outer", vec![("inner", PropertyDescriptor::reference("Inner"))]),
        ("Inner", vec![("x", PropertyDescriptor::scalar())]),
    ]);

    let hit = corpus(&[("a.json", json!({"inner": {"x": 1}}))]);
    let (tree, _) = compute_coverage(&schemas, "Outer", &hit, &CoverageConfig::default()).unwrap();
    assert_eq!(tree["inner"].hits, 1);
    assert_eq!(tree["inner"].children["x"].hits, 1);

    let miss = corpus(&[("b.json", json!({}))]);
    let (tree, _) = compute_coverage(&schemas, "Outer", &miss, &CoverageConfig::default()).unwrap();
    assert_eq!(tree["inner"].hits, 0);
    // Nested fields are still present, with zero counts
    assert_eq!(tree["inner"].children["x"].hits, 0);
}

#[test]
fn test_array_of_reference_flattens_elements() {
    let schemas = schema_set(&[
        ("Outer", vec![("items", PropertyDescriptor::array_of("Item"))]),
        ("Item", vec![("y", PropertyDescriptor::scalar())]),
    ]);
    let docs = corpus(&[("a.json", json!({"items": [{"y": 1}, {}]}))]);

    let (tree, _) = compute_coverage(&schemas, "Outer", &docs, &CoverageConfig::default()).unwrap();
    assert_eq!(tree["items"].hits, 1);
    assert_eq!(tree["items"].children["y"].hits, 1);
}

#[test]
fn test_enum_and_nesting_apply_together() {
    let both = PropertyDescriptor {
        enum_values: Some(vec!["A".into()]),
        ..PropertyDescriptor::reference("Inner")
    };
    let schemas = schema_set(&[
        ("Outer", vec![("field", both)]),
        ("Inner", vec![("z", PropertyDescriptor::scalar())]),
    ]);
    let docs = corpus(&[("a.json", json!({"field": {"z": true}}))]);

    let (tree, _) = compute_coverage(&schemas, "Outer", &docs, &CoverageConfig::default()).unwrap();
    let keys: Vec<&str> = tree["field"].children.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["A", "z"]);
    assert_eq!(tree["field"].children["A"].hits, 0);
    assert_eq!(tree["field"].children["z"].hits, 1);
}

#[test]
fn test_field_counted_once_per_document_across_parts() {
    let schemas = schema_set(&[("R", vec![("a", PropertyDescriptor::scalar())])]);
    let mut docs = Corpus::new();
    docs.insert(
        "stream.txt".into(),
        streamed(&[json!({"a": 1}), json!({"a": 2}), json!({})]),
    );
    let (tree, _) = compute_coverage(&schemas, "R", &docs, &CoverageConfig::default()).unwrap();
    assert_eq!(tree["a"].hits, 1);
}

#[test]
fn test_streamed_parts_combine_for_nested_fields() {
    let schemas = response_schemas();
    let mut docs = Corpus::new();
    docs.insert(
        "stream.txt".into(),
        streamed(&[
            json!({"candidates": [{"content": {"parts": [{"text": "Hel"}]}}]}),
            json!({"candidates": [{"finishReason": "STOP"}], "usageMetadata": {"promptTokenCount": 3}}),
        ]),
    );
    let (tree, _) =
        compute_coverage(&schemas, "Response", &docs, &CoverageConfig::default()).unwrap();
    let candidates = &tree["candidates"];
    assert_eq!(candidates.children["content"].children["parts"].children["text"].hits, 1);
    assert_eq!(candidates.children["finishReason"].children["STOP"].hits, 1);
    assert_eq!(candidates.children["finishReason"].children["SAFETY"].hits, 0);
    assert_eq!(tree["usageMetadata"].children["promptTokenCount"].hits, 1);
    assert_eq!(tree["usageMetadata"].children["candidatesTokenCount"].hits, 0);
}

// ---------------------------------------------------------------------------
// Ignored fields
// ---------------------------------------------------------------------------

#[test]
fn test_ignored_leaf_removed_from_tree_and_total() {
    let schemas = response_schemas();
    let docs = corpus(&[("a.json", json!({"modelVersion": "x"}))]);

    let (full, full_tally) =
        compute_coverage(&schemas, "Response", &docs, &CoverageConfig::default()).unwrap();
    let config = CoverageConfig::default().with_ignored_fields(["modelVersion"]);
    let (trimmed, trimmed_tally) = compute_coverage(&schemas, "Response", &docs, &config).unwrap();

    assert!(full.contains_key("modelVersion"));
    assert!(!trimmed.contains_key("modelVersion"));
    assert_eq!(full_tally.total - trimmed_tally.total, 1);
    assert_eq!(full_tally.covered - trimmed_tally.covered, 1);
}

#[test]
fn test_ignored_enum_removes_its_values() {
    let schemas = response_schemas();
    let (_, full) =
        compute_coverage(&schemas, "Response", &Corpus::new(), &CoverageConfig::default())
            .unwrap();
    let config = CoverageConfig::default().with_ignored_fields(["finishReason"]);
    let (_, trimmed) = compute_coverage(&schemas, "Response", &Corpus::new(), &config).unwrap();
    // The field itself plus its three values
    assert_eq!(full.total - trimmed.total, 4);
}

#[test]
fn test_ignored_names_match_at_every_depth() {
    let schemas = schema_set(&[
        (
            "Outer",
            vec![
                ("inner", PropertyDescriptor::reference("Inner")),
                ("role", PropertyDescriptor::scalar()),
            ],
        ),
        ("Inner", vec![("role", PropertyDescriptor::scalar())]),
    ]);
    let config = CoverageConfig::default().with_ignored_fields(["role"]);
    let (tree, tally) = compute_coverage(&schemas, "Outer", &Corpus::new(), &config).unwrap();
    assert!(!tree.contains_key("role"));
    assert!(tree["inner"].children.is_empty());
    assert_eq!(tally.total, 1);
}

#[test]
fn test_ignored_reference_drops_subtree() {
    let schemas = response_schemas();
    let config = CoverageConfig::default().with_ignored_fields(["candidates"]);
    let (tree, _) = compute_coverage(&schemas, "Response", &Corpus::new(), &config).unwrap();
    let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["modelVersion", "usageMetadata"]);
}

// ---------------------------------------------------------------------------
// Report assembly
// ---------------------------------------------------------------------------

fn response_types() -> Vec<ResponseType> {
    vec![
        ResponseType::new("Response", "Response"),
        ResponseType::new("Count", "Count"),
    ]
}

#[test]
fn test_report_roots_count_documents_per_type() {
    let schemas = response_schemas();
    let classified = classify_corpus(
        &schemas,
        &response_types(),
        corpus(&[
            ("count.json", json!({"totalTokens": 4})),
            ("failure.json", json!({"error": {"code": 400}})),
            ("unary.json", json!({"candidates": [{"index": 0}]})),
            ("unary-2.json", json!({"modelVersion": "m"})),
        ]),
    )
    .unwrap();

    let config = CoverageConfig::default().with_list_files(true);
    let run = compute_report(&schemas, &classified, &response_types(), &config).unwrap();

    let keys: Vec<&str> = run.report.roots.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Response", "Count"]);
    assert_eq!(run.report.roots["Response"].hits, 2);
    assert_eq!(
        run.report.roots["Response"].files.as_deref().unwrap(),
        &["unary-2.json".to_string(), "unary.json".to_string()]
    );
    assert_eq!(run.report.roots["Count"].hits, 1);
    assert_eq!(classified.error_fixtures, vec!["failure.json".to_string()]);

    let expected = (run.tally.covered as f64 / run.tally.total as f64 * 10000.0).round() / 100.0;
    assert_eq!(run.report.total_percent, expected);
}

#[test]
fn test_report_is_idempotent() {
    let schemas = response_schemas();
    let classify = || {
        classify_corpus(
            &schemas,
            &response_types(),
            corpus(&[
                ("a.json", json!({"candidates": [{"finishReason": "STOP"}]})),
                ("b.json", json!({"totalTokens": 1})),
            ]),
        )
        .unwrap()
    };
    let config = CoverageConfig::default();
    let first = compute_report(&schemas, &classify(), &response_types(), &config).unwrap();
    let second = compute_report(&schemas, &classify(), &response_types(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_corpus_reports_zero_percent() {
    let schemas = response_schemas();
    let classified = classify_corpus(&schemas, &response_types(), Corpus::new()).unwrap();
    let run = compute_report(&schemas, &classified, &response_types(), &CoverageConfig::default())
        .unwrap();
    assert_eq!(run.report.total_percent, 0.0);
    assert_eq!(run.tally.covered, 0);
    assert!(run.tally.total > 0);
}

#[test]
fn test_report_with_no_fields_at_all() {
    let schemas = schema_set(&[("Empty", vec![])]);
    let types = vec![ResponseType::new("Empty", "Empty")];
    let classified = classify_corpus(&schemas, &types, Corpus::new()).unwrap();
    let run = compute_report(&schemas, &classified, &types, &CoverageConfig::default()).unwrap();
    assert_eq!(run.tally.total, 0);
    assert_eq!(run.report.total_percent, 0.0);
}

// ---------------------------------------------------------------------------
// Cyclic schemas
// ---------------------------------------------------------------------------

fn linked_schemas() -> SchemaSet {
    schema_set(&[(
        "Node",
        vec![
            ("label", PropertyDescriptor::scalar()),
            ("next", PropertyDescriptor::reference("Node")),
        ],
    )])
}

fn node_report(schemas: &SchemaSet, docs: &Corpus) -> CoverageReport {
    let (children, tally) =
        compute_coverage(schemas, "Node", docs, &CoverageConfig::default()).unwrap();
    let mut root = CoverageNode::new(docs.len() as u64);
    root.children = children;
    CoverageReport {
        roots: [("Node".to_string(), root)].into_iter().collect(),
        total_percent: tally.percent(),
    }
}

#[test]
fn test_cyclic_schema_shape_does_not_depend_on_corpus() {
    let schemas = linked_schemas();
    let shallow = corpus(&[("one.json", json!({"label": "a"}))]);
    let deep = corpus(&[(
        "chain.json",
        json!({"label": "a", "next": {"label": "b", "next": {"label": "c"}}}),
    )]);

    let (shallow_tree, shallow_tally) =
        compute_coverage(&schemas, "Node", &shallow, &CoverageConfig::default()).unwrap();
    let (deep_tree, deep_tally) =
        compute_coverage(&schemas, "Node", &deep, &CoverageConfig::default()).unwrap();

    let keys = |tree: &indexmap::IndexMap<String, CoverageNode>| {
        tree.iter()
            .map(|(k, n)| (k.clone(), n.descendant_count()))
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&shallow_tree), keys(&deep_tree));
    assert_eq!(shallow_tally.total, deep_tally.total);
    assert_eq!(shallow_tally.covered, 1);
    assert_eq!(deep_tally.covered, 2);

    let diff = diff_reports(
        &node_report(&schemas, &shallow),
        &node_report(&schemas, &deep),
        ShapeMode::Strict,
    )
    .unwrap();
    assert!(diff.entry("Node.next").unwrap().change.is_change());
}
