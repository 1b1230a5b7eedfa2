//! Coverage report diff engine.
//!
//! Walks two coverage reports in lockstep and classifies the count change of
//! every field, including the overall percentage.
//!
//! ## Entry point
//!
//! ```ignore
//! use fixcov_core::diff::{diff_reports, render_diff, DiffRenderOptions, ShapeMode};
//!
//! let diff = diff_reports(&old, &new, ShapeMode::Strict)?;
//! print!("{}", render_diff(&diff, &DiffRenderOptions::default()));
//! ```
//!
//! ## Guarantees
//!
//! - **Completeness**: every field is classified, whatever its parent's
//!   classification; only rendering omits unchanged subtrees.
//! - **Strict shapes by default**: reports with different key sets are
//!   rejected with the offending path, unless [`ShapeMode::Lenient`] is used.

pub mod engine;
pub mod model;
pub mod render;

pub use engine::{diff_reports, ShapeMode};
pub use model::{Change, CoverageDiff, DiffEntry, DiffSummary, Measure};
pub use render::{render_diff, DiffRenderOptions};
