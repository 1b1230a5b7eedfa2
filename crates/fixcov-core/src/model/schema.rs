//! Response schemas as published in a discovery document.
//!
//! Only the structural facets the coverage engine needs are modelled:
//! enum values, `$ref` to another schema, and arrays whose items are a
//! `$ref`. Every other descriptor key (descriptions, formats, ...) is ignored.

use crate::errors::{CoverageError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A named type: property name → descriptor.
///
/// Properties are kept in a `BTreeMap` so traversal is always in name order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyDescriptor>,
}

/// Per-field metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyDescriptor {
    /// Allowed values, in declared order
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,

    /// Name of the schema this field is an instance of
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,

    /// Declared JSON type (`"array"`, `"string"`, ...)
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,

    /// Item descriptor for arrays
    #[serde(default)]
    pub items: Option<Box<PropertyDescriptor>>,
}

/// How a field's value nests another schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting<'a> {
    /// The value is one instance of the named schema
    Object(&'a str),
    /// The value is an array of instances of the named schema
    Array(&'a str),
}

impl<'a> Nesting<'a> {
    /// Name of the nested schema
    pub fn schema_name(&self) -> &'a str {
        match self {
            Nesting::Object(name) | Nesting::Array(name) => name,
        }
    }
}

impl PropertyDescriptor {
    /// A plain scalar field
    pub fn scalar() -> Self {
        Self::default()
    }

    /// A field restricted to the given values
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// A field holding one instance of `schema`
    pub fn reference(schema: impl Into<String>) -> Self {
        Self {
            reference: Some(schema.into()),
            ..Self::default()
        }
    }

    /// A field holding an array of `schema` instances
    pub fn array_of(schema: impl Into<String>) -> Self {
        Self {
            type_name: Some("array".to_string()),
            items: Some(Box::new(Self::reference(schema))),
            ..Self::default()
        }
    }

    /// Allowed enum values; empty for non-enum fields
    pub fn enum_values(&self) -> &[String] {
        self.enum_values.as_deref().unwrap_or_default()
    }

    /// The nested schema, if any. A direct `$ref` wins over array items.
    pub fn nesting(&self) -> Option<Nesting<'_>> {
        if let Some(reference) = &self.reference {
            return Some(Nesting::Object(reference));
        }
        if self.type_name.as_deref() == Some("array") {
            return self
                .items
                .as_ref()
                .and_then(|items| items.reference.as_deref())
                .map(Nesting::Array);
        }
        None
    }
}

/// All schemas of one discovery document, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSet {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaSet {
    /// Build from already-constructed schemas
    pub fn from_schemas(schemas: BTreeMap<String, Schema>) -> Self {
        Self { schemas }
    }

    /// Parse the `schemas` mapping of a discovery document
    ///
    /// # Errors
    ///
    /// `InvalidSchema` if the document has no `schemas` object or a schema
    /// entry does not have the expected shape.
    pub fn from_discovery_document(document: &Value) -> Result<Self> {
        let schemas = document
            .get("schemas")
            .and_then(Value::as_object)
            .ok_or_else(|| CoverageError::InvalidSchemaDocument {
                reason: "document has no `schemas` object".to_string(),
            })?;

        let mut parsed = BTreeMap::new();
        for (name, raw) in schemas {
            let schema: Schema = serde_json::from_value(raw.clone()).map_err(|e| {
                CoverageError::InvalidSchemaDocument {
                    reason: format!("schema `{}`: {}", name, e),
                }
            })?;
            parsed.insert(name.clone(), schema);
        }

        Ok(Self { schemas: parsed })
    }

    /// Look up a schema by name
    ///
    /// # Errors
    ///
    /// `UnknownSchema` if no schema has this name.
    pub fn get(&self, name: &str) -> Result<&Schema> {
        self.schemas.get(name).ok_or_else(|| {
            CoverageError::UnknownSchema {
                schema: name.to_string(),
            }
            .into()
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// `(schema.field, target)` pairs whose nested schema does not exist
    pub fn unresolved_references(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for (name, schema) in &self.schemas {
            for (field, descriptor) in &schema.properties {
                if let Some(nesting) = descriptor.nesting() {
                    if !self.contains(nesting.schema_name()) {
                        missing.push((
                            format!("{}.{}", name, field),
                            nesting.schema_name().to_string(),
                        ));
                    }
                }
            }
        }
        missing
    }
}
