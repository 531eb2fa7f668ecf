//! Column set diffing
//!
//! Order never matters: only name membership and structural attribute
//! equality feed the result.

use blastradius_core::{ColumnDescriptor, ColumnDiff, ModifiedColumn};
use std::collections::HashMap;

/// Diff two column sets for one file
///
/// `added` keeps the after-side order, `removed` the before-side order,
/// `modified` the after-side order. Duplicate names within one side keep
/// their first descriptor.
pub fn diff_columns(
    file: impl Into<String>,
    before: &[ColumnDescriptor],
    after: &[ColumnDescriptor],
) -> ColumnDiff {
    let before_by_name = index_by_name(before);
    let after_by_name = index_by_name(after);

    let mut added = Vec::new();
    let mut modified = Vec::new();
    for col in after {
        match before_by_name.get(col.name.as_str()) {
            None => {
                if !added.iter().any(|c: &ColumnDescriptor| c.name == col.name) {
                    added.push(col.clone());
                }
            }
            Some(prev) => {
                if prev.attributes != col.attributes
                    && !modified.iter().any(|m: &ModifiedColumn| m.name == col.name)
                {
                    modified.push(ModifiedColumn {
                        name: col.name.clone(),
                        before: (*prev).clone(),
                        after: col.clone(),
                    });
                }
            }
        }
    }

    let mut removed = Vec::new();
    for col in before {
        if !after_by_name.contains_key(col.name.as_str())
            && !removed.iter().any(|c: &ColumnDescriptor| c.name == col.name)
        {
            removed.push(col.clone());
        }
    }

    ColumnDiff {
        file: file.into(),
        added,
        removed,
        modified,
    }
}

/// First descriptor per name
fn index_by_name(columns: &[ColumnDescriptor]) -> HashMap<&str, &ColumnDescriptor> {
    let mut map = HashMap::new();
    for col in columns {
        map.entry(col.name.as_str()).or_insert(col);
    }
    map
}
