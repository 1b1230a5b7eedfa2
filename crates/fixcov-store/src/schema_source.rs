//! Schema document sources
//!
//! The schema set comes from a discovery document, read from a local file or
//! fetched over HTTP. A fetched document can be cached on disk; a present
//! cache is used instead of the network.

use crate::errors::{io_error, missing_file, schema_fetch, schema_parse, Result};
use fixcov_core::model::SchemaSet;
use fixcov_core::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Public discovery document of the Vertex AI in Firebase API
pub const DEFAULT_DISCOVERY_URL: &str =
    "https://firebasevertexai.googleapis.com/$discovery/rest?version=v1beta";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the discovery document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    File(PathBuf),
    Url {
        url: String,
        /// Read when present, written after a successful fetch
        cache: Option<PathBuf>,
    },
}

impl Default for SchemaSource {
    fn default() -> Self {
        SchemaSource::Url {
            url: DEFAULT_DISCOVERY_URL.to_string(),
            cache: None,
        }
    }
}

impl SchemaSource {
    /// Load and parse the schema set
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if a schema file does not exist
    /// - `Io` if a file cannot be read
    /// - `ExternalService` if the download fails
    /// - `InvalidSchema` if the document is not a usable discovery document
    pub fn load(&self) -> Result<SchemaSet> {
        let start = Instant::now();
        log_op_start!("load_schema_document", source = %self.describe());

        let result = self
            .load_document()
            .and_then(|document| SchemaSet::from_discovery_document(&document));
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(schemas) => {
                log_op_end!(
                    "load_schema_document",
                    duration_ms = duration_ms,
                    schemas = schemas.len()
                );
                for (field, target) in schemas.unresolved_references() {
                    tracing::warn!(
                        field_path = %field,
                        schema = %target,
                        "referenced schema is not defined"
                    );
                }
            }
            Err(err) => {
                log_op_error!("load_schema_document", err.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    fn describe(&self) -> String {
        match self {
            SchemaSource::File(path) => path.display().to_string(),
            SchemaSource::Url { url, .. } => url.clone(),
        }
    }

    fn load_document(&self) -> Result<Value> {
        match self {
            SchemaSource::File(path) => read_document(path),
            SchemaSource::Url {
                cache: Some(cache),
                ..
            } if cache.is_file() => {
                tracing::debug!(cache = %cache.display(), "using cached schema document");
                read_document(cache)
            }
            SchemaSource::Url { url, cache } => {
                let body = fetch_document(url)?;
                let document = parse_document(url, &body)?;
                if let Some(cache) = cache {
                    if let Err(err) = write_cache(cache, &body) {
                        tracing::warn!(
                            cache = %cache.display(),
                            error = %err,
                            "schema cache not written"
                        );
                    }
                }
                Ok(document)
            }
        }
    }
}

fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(missing_file("load_schema_document", path));
    }
    let text = fs::read_to_string(path).map_err(|e| io_error("load_schema_document", path, e))?;
    parse_document(&path.display().to_string(), &text)
}

fn parse_document(source: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| schema_parse(source, &format!("not valid JSON: {}", e)))
}

fn fetch_document(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| schema_fetch(url, &e.to_string()))?;
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|e| schema_fetch(url, &e.to_string()))
}

fn write_cache(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("write_schema_cache", parent, e))?;
    }
    fs::write(path, body).map_err(|e| io_error("write_schema_cache", path, e))
}
