//! Coverage trees and their serialized form.
//!
//! The serialized form is the contract between a coverage run and a later
//! diff: every node is an object with `_coverage_num`, an optional
//! `_coverage_files`, and one entry per child field, in traversal order. The
//! report root adds a `Total Coverage` entry holding the percentage.
//!
//! Serialization is implemented against serde's data model rather than
//! `serde_json::Value`, so the same report round-trips through JSON or YAML.

use fixcov_core_types::report_keys::is_reserved;
use fixcov_core_types::{FILES_KEY, NUM_KEY, TOTAL_KEY};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// One field's coverage: hit count, contributing files, child fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageNode {
    /// Number of distinct documents reaching this field
    pub hits: u64,
    /// Identifiers of those documents, when file listing was requested
    pub files: Option<Vec<String>>,
    /// Enum values (declared order) followed by nested fields (name order)
    pub children: IndexMap<String, CoverageNode>,
}

impl CoverageNode {
    pub fn new(hits: u64) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn child(&self, name: &str) -> Option<&CoverageNode> {
        self.children.get(name)
    }

    /// Follow a path of child names
    pub fn descendant(&self, path: &[&str]) -> Option<&CoverageNode> {
        path.iter()
            .try_fold(self, |node, name| node.children.get(*name))
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Coverage of every response type plus the overall percentage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    /// Response type name → root node (hits = documents of that type)
    pub roots: IndexMap<String, CoverageNode>,
    /// covered / total × 100, rounded to two decimals
    pub total_percent: f64,
}

impl CoverageReport {
    /// Look up a node by dotted path, e.g. `GenerateContentResponse.candidates`
    pub fn node(&self, dotted: &str) -> Option<&CoverageNode> {
        let mut segments = dotted.split('.');
        let root = self.roots.get(segments.next()?)?;
        let rest: Vec<&str> = segments.collect();
        root.descendant(&rest)
    }
}

impl Serialize for CoverageNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.files.is_some()) + self.children.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(NUM_KEY, &self.hits)?;
        if let Some(files) = &self.files {
            map.serialize_entry(FILES_KEY, files)?;
        }
        for (name, child) in &self.children {
            map.serialize_entry(name, child)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CoverageNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = CoverageNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a coverage node object with `{}`", NUM_KEY)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CoverageNode, A::Error> {
        let mut hits: Option<u64> = None;
        let mut files: Option<Vec<String>> = None;
        let mut children = IndexMap::new();

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                NUM_KEY => {
                    if hits.is_some() {
                        return Err(de::Error::duplicate_field(NUM_KEY));
                    }
                    hits = Some(access.next_value()?);
                }
                FILES_KEY => {
                    if files.is_some() {
                        return Err(de::Error::duplicate_field(FILES_KEY));
                    }
                    files = Some(access.next_value()?);
                }
                _ => {
                    let child: CoverageNode = access.next_value()?;
                    children.insert(key, child);
                }
            }
        }

        Ok(CoverageNode {
            hits: hits.ok_or_else(|| de::Error::missing_field(NUM_KEY))?,
            files,
            children,
        })
    }
}

impl Serialize for CoverageReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.roots.len() + 1))?;
        for (name, root) in &self.roots {
            map.serialize_entry(name, root)?;
        }
        let total: BTreeMap<&str, f64> = BTreeMap::from([(NUM_KEY, self.total_percent)]);
        map.serialize_entry(TOTAL_KEY, &total)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for CoverageReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReportVisitor)
    }
}

struct ReportVisitor;

impl<'de> Visitor<'de> for ReportVisitor {
    type Value = CoverageReport;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a coverage report object with `{}`", TOTAL_KEY)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CoverageReport, A::Error> {
        let mut roots = IndexMap::new();
        let mut total_percent: Option<f64> = None;

        while let Some(key) = access.next_key::<String>()? {
            if key == TOTAL_KEY {
                let entry: BTreeMap<String, f64> = access.next_value()?;
                let percent = entry
                    .get(NUM_KEY)
                    .copied()
                    .ok_or_else(|| de::Error::missing_field(NUM_KEY))?;
                total_percent = Some(percent);
            } else if is_reserved(&key) {
                return Err(de::Error::custom(format!(
                    "`{}` is not allowed at the report root",
                    key
                )));
            } else {
                let root: CoverageNode = access.next_value()?;
                roots.insert(key, root);
            }
        }

        Ok(CoverageReport {
            roots,
            total_percent: total_percent.ok_or_else(|| de::Error::missing_field(TOTAL_KEY))?,
        })
    }
}
