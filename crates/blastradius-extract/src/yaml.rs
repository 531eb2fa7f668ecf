//! Column extraction from dbt-style YAML schema files
//!
//! Recognizes two shapes: a `models:` list where each entry carries a
//! `columns:` list, and a flat top-level `columns:` list. Anything else
//! yields an empty set rather than an error.

use crate::ExtractError;
use blastradius_core::ColumnDescriptor;
use serde_yaml::Value;

/// Extract declared columns from a YAML schema file
pub fn extract_yaml_columns(content: &str) -> Result<Vec<ColumnDescriptor>, ExtractError> {
    let doc: Value =
        serde_yaml::from_str(content).map_err(|e| ExtractError::YamlParse(e.to_string()))?;

    let mut columns = Vec::new();

    if let Some(models) = doc.get("models").and_then(Value::as_sequence) {
        for model in models {
            collect_columns(model.get("columns"), &mut columns);
        }
    } else {
        collect_columns(doc.get("columns"), &mut columns);
    }

    Ok(columns)
}

/// Append descriptors from a `columns:` sequence, if present
fn collect_columns(node: Option<&Value>, out: &mut Vec<ColumnDescriptor>) {
    let Some(entries) = node.and_then(Value::as_sequence) else {
        return;
    };

    for entry in entries {
        let Some(mapping) = entry.as_mapping() else {
            continue;
        };
        let Some(name) = entry.get("name").and_then(Value::as_str) else {
            continue;
        };

        let mut descriptor = ColumnDescriptor::new(name);
        for (key, value) in mapping {
            let Some(key) = key.as_str() else { continue };
            if key == "name" {
                continue;
            }
            // YAML scalars/sequences carry over losslessly to JSON values.
            if let Ok(json) = serde_json::to_value(value) {
                descriptor.attributes.insert(key.to_string(), json);
            }
        }
        out.push(descriptor);
    }
}
