//! Coverage report files
//!
//! Reports are JSON unless the file name ends in `.yaml` or `.yml`.

use crate::errors::{io_error, missing_file, report_parse, report_serialize, Result};
use fixcov_core::model::CoverageReport;
use std::fs;
use std::path::Path;

/// Serialization format of a report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Yaml,
}

impl ReportFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ReportFormat::Yaml
            }
            _ => ReportFormat::Json,
        }
    }
}

/// Serialize a report; JSON is pretty-printed with two-space indentation
///
/// # Errors
///
/// `Serialization` if the report cannot be encoded.
pub fn report_to_string(report: &CoverageReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).map_err(|e| report_serialize(&e.to_string()))
        }
        ReportFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| report_serialize(&e.to_string()))
        }
    }
}

/// Read a report file
///
/// # Errors
///
/// - `InvalidInput` if the file does not exist
/// - `Io` if it cannot be read
/// - `InvalidReport` if it is not a coverage report
pub fn read_report(path: &Path) -> Result<CoverageReport> {
    if !path.is_file() {
        return Err(missing_file("read_report", path));
    }
    let text = fs::read_to_string(path).map_err(|e| io_error("read_report", path, e))?;
    let report: CoverageReport = match ReportFormat::from_path(path) {
        ReportFormat::Json => {
            serde_json::from_str(&text).map_err(|e| report_parse(path, &e.to_string()))
        }
        ReportFormat::Yaml => {
            serde_yaml::from_str(&text).map_err(|e| report_parse(path, &e.to_string()))
        }
    }?;
    tracing::debug!(file = %path.display(), roots = report.roots.len(), "report read");
    Ok(report)
}

/// Write a report file in the format its extension selects
///
/// # Errors
///
/// - `Serialization` if the report cannot be encoded
/// - `Io` if the file cannot be written
pub fn write_report(path: &Path, report: &CoverageReport) -> Result<()> {
    let mut text = report_to_string(report, ReportFormat::from_path(path))?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text).map_err(|e| io_error("write_report", path, e))?;
    tracing::debug!(file = %path.display(), "report written");
    Ok(())
}
