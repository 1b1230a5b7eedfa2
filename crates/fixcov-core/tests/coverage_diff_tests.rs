//! Coverage differ tests: change classification, shape modes, omission of
//! unchanged subtrees and the `Total Coverage` entry.
//!
//! All tests operate on in-memory reports (no I/O).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use fixcov_core::diff::{
    diff_reports, render_diff, Change, DiffRenderOptions, ShapeMode,
};
use fixcov_core::errors::ExErrorKind;
use fixcov_core::model::CoverageReport;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn report(value: serde_json::Value) -> CoverageReport {
    serde_json::from_value(value).unwrap()
}

fn baseline() -> CoverageReport {
    report(json!({
        "GenerateContentResponse": {
            "_coverage_num": 5,
            "candidates": {
                "_coverage_num": 5,
                "finishReason": {
                    "_coverage_num": 3,
                    "STOP": {"_coverage_num": 3},
                    "SAFETY": {"_coverage_num": 0}
                },
                "index": {"_coverage_num": 2}
            },
            "modelVersion": {"_coverage_num": 4}
        },
        "CountTokensResponse": {
            "_coverage_num": 1,
            "totalTokens": {"_coverage_num": 1}
        },
        "Total Coverage": {"_coverage_num": 80.0}
    }))
}

fn plain() -> DiffRenderOptions {
    DiffRenderOptions {
        all_fields: false,
        color: false,
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn test_self_diff_is_all_unchanged() {
    let diff = diff_reports(&baseline(), &baseline(), ShapeMode::Strict).unwrap();
    assert!(!diff.has_changes());
    let summary = diff.summary();
    assert_eq!(summary.newly_covered + summary.lost_coverage, 0);
    assert_eq!(summary.regressed + summary.improved, 0);
    assert_eq!(render_diff(&diff, &plain()), "");
}

#[test]
fn test_each_outcome_is_classified() {
    let mut new = baseline();
    let root = new.roots.get_mut("GenerateContentResponse").unwrap();
    let candidates = root.children.get_mut("candidates").unwrap();
    candidates
        .children
        .get_mut("finishReason")
        .unwrap()
        .children
        .get_mut("SAFETY")
        .unwrap()
        .hits = 5;
    candidates.children.get_mut("index").unwrap().hits = 0;
    root.children.get_mut("modelVersion").unwrap().hits = 2;
    new.roots
        .get_mut("CountTokensResponse")
        .unwrap()
        .children
        .get_mut("totalTokens")
        .unwrap()
        .hits = 3;
    new.total_percent = 85.5;

    let diff = diff_reports(&baseline(), &new, ShapeMode::Strict).unwrap();
    let change = |path: &str| diff.entry(path).unwrap().change;

    assert_eq!(
        change("GenerateContentResponse.candidates.finishReason.SAFETY"),
        Change::NewlyCovered
    );
    assert_eq!(
        change("GenerateContentResponse.candidates.index"),
        Change::LostCoverage
    );
    assert_eq!(
        change("GenerateContentResponse.modelVersion"),
        Change::Regressed { critical: false }
    );
    assert_eq!(
        change("CountTokensResponse.totalTokens"),
        Change::Improved { critical: false }
    );
    assert_eq!(change("Total Coverage"), Change::Improved { critical: true });
    assert_eq!(
        change("GenerateContentResponse.candidates"),
        Change::Unchanged
    );
}

#[test]
fn test_unchanged_regardless_of_all_fields() {
    let diff = diff_reports(&baseline(), &baseline(), ShapeMode::Strict).unwrap();
    let all = render_diff(
        &diff,
        &DiffRenderOptions {
            all_fields: true,
            color: false,
        },
    );
    assert!(all.contains("| | index: 2\n"));
    assert!(!all.contains("->"));
    assert!(all.ends_with("Total Coverage: 80.0%\n"));
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_deep_flip_emits_ancestor_chain_only() {
    let mut new = baseline();
    new.roots
        .get_mut("GenerateContentResponse")
        .unwrap()
        .children
        .get_mut("candidates")
        .unwrap()
        .children
        .get_mut("finishReason")
        .unwrap()
        .children
        .get_mut("STOP")
        .unwrap()
        .hits = 0;

    let diff = diff_reports(&baseline(), &new, ShapeMode::Strict).unwrap();
    assert_eq!(
        render_diff(&diff, &plain()),
        "GenerateContentResponse: 5\n\
         | candidates: 5\n\
         | | finishReason: 3\n\
         | | | STOP: 3 -> 0\n"
    );
}

#[test]
fn test_total_change_renders_percent() {
    let mut new = baseline();
    new.total_percent = 79.25;
    let diff = diff_reports(&baseline(), &new, ShapeMode::Strict).unwrap();
    assert_eq!(
        render_diff(&diff, &plain()),
        "Total Coverage: 80.0% -> 79.25%\n"
    );
}

// ---------------------------------------------------------------------------
// Shape handling
// ---------------------------------------------------------------------------

#[test]
fn test_strict_rejects_new_field() {
    let mut new = baseline();
    new.roots
        .get_mut("CountTokensResponse")
        .unwrap()
        .children
        .insert("cachedContentTokenCount".into(), Default::default());

    let err = diff_reports(&baseline(), &new, ShapeMode::Strict).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ShapeMismatch);
    assert_eq!(err.field_path(), Some("CountTokensResponse"));
    assert!(err.message().contains("cachedContentTokenCount"));
}

#[test]
fn test_lenient_reports_schema_growth() {
    let mut new = baseline();
    let mut added = fixcov_core::model::CoverageNode::new(1);
    added
        .children
        .insert("nested".into(), fixcov_core::model::CoverageNode::new(1));
    new.roots
        .get_mut("CountTokensResponse")
        .unwrap()
        .children
        .insert("cachedContentTokenCount".into(), added);

    let diff = diff_reports(&baseline(), &new, ShapeMode::Lenient).unwrap();
    assert_eq!(
        diff.entry("CountTokensResponse.cachedContentTokenCount.nested")
            .unwrap()
            .change,
        Change::NewlyCovered
    );
    assert_eq!(
        render_diff(&diff, &plain()),
        "CountTokensResponse: 1\n\
         | cachedContentTokenCount: 0 -> 1\n\
         | | nested: 0 -> 1\n"
    );
}
