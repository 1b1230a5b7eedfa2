//! Domain models: schemas, fixture documents, coverage reports.

pub mod document;
pub mod report;
pub mod schema;

pub use document::{Corpus, Document, Part};
pub use report::{CoverageNode, CoverageReport};
pub use schema::{Nesting, PropertyDescriptor, Schema, SchemaSet};
