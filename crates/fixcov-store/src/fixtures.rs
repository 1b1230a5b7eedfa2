//! Fixture discovery and loading
//!
//! Fixtures are the regular files directly inside one directory, taken in
//! name order. Exclusion patterns are evaluated relative to that directory.
//! Scan-file patterns name source files (tests, usually) whose word-like
//! tokens select fixtures by file stem.

use crate::errors::{invalid_pattern, io_error, no_matches, Result};
use fixcov_core::errors::ExError;
use fixcov_core::loader::{parse_document, ParseOutcome};
use fixcov_core::model::Corpus;
use fixcov_core::{log_op_end, log_op_start};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Tokens of scanned files that may name a fixture
const FIXTURE_NAME_TOKEN: &str = r"[a-zA-Z0-9-]+";

/// Which fixtures of the directory take part in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSelection {
    /// Glob patterns, relative to the fixtures directory, of files to skip
    pub exclude: Vec<String>,
    /// Glob patterns of files to scan for fixture names; empty keeps all
    pub scan_files: Vec<String>,
}

/// Fixtures read from disk, plus the ones that could not be used.
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub corpus: Corpus,
    /// Unreadable or malformed fixtures; they are left out of the corpus
    pub failures: Vec<ExError>,
    /// Fixtures from which nothing was extracted
    pub no_data: Vec<String>,
}

/// List the selected fixture names of `dir`, sorted
///
/// # Errors
///
/// - `Io` if the directory cannot be read
/// - `InvalidInput` if a pattern is invalid or matches no file
pub fn list_fixtures(dir: &Path, selection: &FixtureSelection) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| io_error("list_fixtures", dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error("list_fixtures", dir, e))?;
        let is_file = entry
            .file_type()
            .map_err(|e| io_error("list_fixtures", &entry.path(), e))?
            .is_file();
        if is_file {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    if !selection.exclude.is_empty() {
        let mut excluded = BTreeSet::new();
        for pattern in &selection.exclude {
            for path in expand_pattern(Some(dir), pattern)? {
                excluded.insert(path.to_string_lossy().into_owned());
            }
        }
        names.retain(|name| !excluded.contains(name));
    }

    if !selection.scan_files.is_empty() {
        let tokens = scan_tokens(&selection.scan_files)?;
        names.retain(|name| tokens.contains(file_stem(name)));
    }

    tracing::debug!(dir = %dir.display(), fixtures = names.len(), "fixtures selected");
    Ok(names)
}

/// Read and parse the named fixtures of `dir`
///
/// Per-file problems never abort: unreadable and malformed fixtures end up
/// in `failures`, empty ones in `no_data`, each with a warning.
pub fn load_corpus(dir: &Path, names: &[String]) -> LoadedCorpus {
    let start = Instant::now();
    log_op_start!("load_corpus", document_count = names.len());

    let mut loaded = LoadedCorpus::default();
    for name in names {
        let path = dir.join(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = io_error("read_fixture", &path, e);
                tracing::warn!(file = %name, error = %err, "fixture could not be read");
                loaded.failures.push(err);
                continue;
            }
        };
        match parse_document(name, &bytes) {
            Ok(ParseOutcome::Parts(document)) => {
                loaded.corpus.insert(name.clone(), document);
            }
            Ok(ParseOutcome::NoData) => {
                tracing::warn!(file = %name, "No data extracted from file");
                loaded.no_data.push(name.clone());
            }
            Err(err) => {
                tracing::warn!(file = %name, error = %err, "fixture is malformed");
                loaded.failures.push(err);
            }
        }
    }

    log_op_end!(
        "load_corpus",
        duration_ms = start.elapsed().as_millis() as u64,
        document_count = loaded.corpus.len(),
        failures = loaded.failures.len(),
        no_data = loaded.no_data.len()
    );
    loaded
}

/// List then load the selected fixtures of `dir`
///
/// # Errors
///
/// See [`list_fixtures`].
pub fn load_fixtures(dir: &Path, selection: &FixtureSelection) -> Result<LoadedCorpus> {
    let names = list_fixtures(dir, selection)?;
    Ok(load_corpus(dir, &names))
}

/// Files matching `pattern`, relative to `root` when one is given
fn expand_pattern(root: Option<&Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    // The root is a literal path; only `pattern` may carry glob syntax
    let full = match root {
        Some(root) => {
            let root = root
                .to_str()
                .ok_or_else(|| invalid_pattern(pattern, "directory is not valid UTF-8"))?;
            Path::new(&glob::Pattern::escape(root)).join(pattern)
        }
        None => PathBuf::from(pattern),
    };
    let full = full
        .to_str()
        .ok_or_else(|| invalid_pattern(pattern, "path is not valid UTF-8"))?;

    let mut matches = Vec::new();
    for entry in glob::glob(full).map_err(|e| invalid_pattern(pattern, &e.to_string()))? {
        let Ok(path) = entry else {
            continue;
        };
        if !path.is_file() {
            continue;
        }
        let relative = match root.and_then(|root| path.strip_prefix(root).ok()) {
            Some(relative) => relative.to_path_buf(),
            None => path.clone(),
        };
        matches.push(relative);
    }

    if matches.is_empty() {
        return Err(no_matches(pattern));
    }
    Ok(matches)
}

fn scan_tokens(patterns: &[String]) -> Result<BTreeSet<String>> {
    let token = Regex::new(FIXTURE_NAME_TOKEN)
        .map_err(|e| invalid_pattern(FIXTURE_NAME_TOKEN, &e.to_string()))?;
    let mut tokens = BTreeSet::new();
    for pattern in patterns {
        for path in expand_pattern(None, pattern)? {
            let bytes = fs::read(&path).map_err(|e| io_error("scan_files", &path, e))?;
            let text = String::from_utf8_lossy(&bytes);
            tokens.extend(token.find_iter(&text).map(|m| m.as_str().to_string()));
        }
    }
    Ok(tokens)
}

/// Fixture name up to its first dot
fn file_stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
