//! Canonical field keys and event names for structured logging
//!
//! These constants keep every log line and error report consistent.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_FILE: &str = "file";
pub const FIELD_SCHEMA: &str = "schema";
pub const FIELD_RESPONSE_TYPE: &str = "response_type";
pub const FIELD_PATH: &str = "field_path";

// Collection sizes and counters
pub const FIELD_DOCUMENT_COUNT: &str = "document_count";
pub const FIELD_COVERED: &str = "covered";
pub const FIELD_TOTAL: &str = "total";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
