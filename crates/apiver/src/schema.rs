//! Documentation listing for expanded route tables
//!
//! Builds the schema-facing view of a [`VersionedTable`]: only routes whose
//! `include_in_schema` flag survived expansion appear, so hidden discovery
//! stubs and unavailable version copies never leak into generated docs.
//! Paths are kept in a `BTreeMap` so serialized output is stable.

use crate::transform::VersionedTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Document metadata
#[derive(Debug, Clone, Serialize)]
pub struct SchemaInfo {
    pub title: String,
    pub version: String,
}

/// One documented entry under a path
#[derive(Debug, Clone, Serialize)]
pub struct SchemaEntry {
    pub methods: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Schema-visible view of an expanded route table
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocument {
    pub info: SchemaInfo,
    pub paths: BTreeMap<String, Vec<SchemaEntry>>,
}

impl SchemaDocument {
    /// Build the documentation listing for a table
    pub fn from_table(
        table: &VersionedTable,
        title: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let mut paths: BTreeMap<String, Vec<SchemaEntry>> = BTreeMap::new();

        for route in table.schema_visible() {
            let descriptor = &route.descriptor;
            paths
                .entry(descriptor.path.clone())
                .or_default()
                .push(SchemaEntry {
                    methods: descriptor
                        .methods
                        .iter()
                        .map(|m| m.as_str().to_string())
                        .collect(),
                    tags: descriptor.tags.clone(),
                    deprecated: descriptor.deprecated,
                    summary: descriptor.summary.clone(),
                    description: descriptor.description.clone(),
                });
        }

        Self {
            info: SchemaInfo {
                title: title.into(),
                version: version.into(),
            },
            paths,
        }
    }

    /// Number of documented paths
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Whether a path appears in the listing
    pub fn contains_path(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Serialize the document to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
