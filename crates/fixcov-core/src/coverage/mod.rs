//! Schema coverage engine.
//!
//! Walks a schema tree depth-first and, for every reachable field, counts the
//! documents of a corpus that exercise it.
//!
//! ## Entry points
//!
//! ```ignore
//! use fixcov_core::coverage::{compute_report, CoverageConfig};
//!
//! let run = compute_report(&schemas, &classified, &response_types, &CoverageConfig::default())?;
//! println!("{}", fixcov_core::coverage::render_coverage(&run.report, &Default::default()));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: properties are visited in name order and documents in
//!   identifier order, so identical inputs give identical trees.
//! - **Independence**: every call owns its tally; nothing is kept between calls.
//! - **Termination**: cyclic schemas are only expanded while documents still
//!   reach them, and `max_depth` bounds the recursion regardless.

pub mod config;
pub mod engine;
pub mod render;
pub mod tally;

pub use config::{CoverageConfig, DEFAULT_MAX_DEPTH};
pub use engine::{compute_coverage, compute_report, CoverageRun};
pub use render::{render_coverage, CoverageRenderOptions};
pub use tally::FieldTally;
