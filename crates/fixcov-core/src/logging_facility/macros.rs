//! Canonical logging macros
//!
//! Every public operation of the crate brackets its work with these so log
//! consumers can pair start/end events by `op`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use fixcov_core::log_op_start;
/// log_op_start!("compute_report");
/// log_op_start!("compute_report", document_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::fixcov_core_types::log_fields::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::fixcov_core_types::log_fields::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use fixcov_core::log_op_end;
/// log_op_end!("compute_report", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::fixcov_core_types::log_fields::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::fixcov_core_types::log_fields::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into [`crate::errors::ExError`] so the event
/// always carries the stable error code.
///
/// # Example
///
/// ```
/// # use fixcov_core::log_op_error;
/// # use fixcov_core::errors::CoverageError;
/// let err = CoverageError::UnknownSchema { schema: "Missing".to_string() };
/// log_op_error!("compute_report", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::fixcov_core_types::log_fields::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::fixcov_core_types::log_fields::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
