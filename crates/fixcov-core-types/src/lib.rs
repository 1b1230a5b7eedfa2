//! Core types shared across fixcov facilities
//!
//! This crate provides the constants shared by the logging facility, the
//! coverage engine and the coverage differ:
//!
//! - **Log fields**: canonical field keys and event names for structured logging
//! - **Report keys**: the keywords of the serialized coverage report format

pub mod log_fields;
pub mod report_keys;

pub use report_keys::{FILES_KEY, NUM_KEY, TOTAL_KEY};
