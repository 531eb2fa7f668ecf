//! Column descriptors and column-level diffs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declared or inferred column
///
/// Add/remove equality is by `name` only; "modified" equality compares the
/// full attribute mapping structurally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Free-form declared attributes (type, description, tests, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl ColumnDescriptor {
    /// Create a column with no attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// A column present before and after with differing attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedColumn {
    /// Column name
    pub name: String,

    /// Descriptor at the base revision
    pub before: ColumnDescriptor,

    /// Descriptor at the head revision
    pub after: ColumnDescriptor,
}

/// Column-level diff for one changed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDiff {
    /// Changed file path
    pub file: String,

    /// Columns present after but not before
    pub added: Vec<ColumnDescriptor>,

    /// Columns present before but not after
    pub removed: Vec<ColumnDescriptor>,

    /// Columns present in both with differing attributes
    pub modified: Vec<ModifiedColumn>,
}

impl ColumnDiff {
    /// Whether the diff carries any change at all
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}
