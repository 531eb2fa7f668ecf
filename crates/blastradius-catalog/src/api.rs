//! Wire types for the catalog/lineage service
//!
//! Strict ingress schema: responses are validated and coerced here, at
//! the client boundary. A record that does not fit the expected shape is
//! dropped rather than propagated into the walker.

use blastradius_core::{AssetIdentity, CatalogTask, FlowDirection, LineageEdge};
use serde::Deserialize;

/// One page of the bulk task listing
#[derive(Debug, Deserialize)]
pub struct TaskPage {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

/// A task entry as returned by the catalog
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub name: String,
    pub connection_type: String,
    pub connection_id: String,
    #[serde(default)]
    pub connection_name: String,
    pub asset_id: String,
    #[serde(default)]
    pub task_id: String,
}

impl From<TaskRecord> for CatalogTask {
    fn from(record: TaskRecord) -> Self {
        CatalogTask {
            name: record.name,
            connection_type: record.connection_type,
            connection_id: record.connection_id,
            connection_name: record.connection_name,
            asset_id: record.asset_id,
            task_id: record.task_id,
        }
    }
}

/// Raw lineage response for one asset
#[derive(Debug, Deserialize)]
pub struct LineageResponse {
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// A lineage edge as returned by the service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub name: String,
    #[serde(default)]
    pub connection_name: String,
    pub flow: String,
    pub asset_id: String,
    pub connection_id: String,
    #[serde(default)]
    pub entity: String,
}

impl EdgeRecord {
    /// Coerce to a domain edge; unknown flow values drop the edge
    pub fn into_edge(self) -> Option<LineageEdge> {
        let flow = match self.flow.as_str() {
            "upstream" => FlowDirection::Upstream,
            "downstream" => FlowDirection::Downstream,
            "self" => FlowDirection::SelfRef,
            _ => return None,
        };

        // The entity field is absent from some catalog variants; the edge
        // name is the entity in that case.
        let entity = if self.entity.is_empty() {
            self.name.clone()
        } else {
            self.entity
        };

        Some(LineageEdge {
            target: AssetIdentity::new(self.asset_id, self.connection_id, entity),
            name: self.name,
            connection_name: self.connection_name,
            flow,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_record_camel_case() {
        let json = r#"{
            "name": "orders",
            "connectionType": "dbt",
            "connectionId": "c-1",
            "connectionName": "warehouse",
            "assetId": "a-1",
            "taskId": "job-1"
        }"#;

        let record: TaskRecord = serde_json::from_str(json).unwrap();
        let task: CatalogTask = record.into();
        assert_eq!(task.name, "orders");
        assert!(task.is_dbt());
        assert_eq!(task.task_id, "job-1");
    }

    #[test]
    fn missing_required_field_fails_closed() {
        // No assetId: the record is rejected as a whole.
        let json = r#"{"name": "orders", "connectionType": "dbt", "connectionId": "c-1"}"#;
        assert!(serde_json::from_str::<TaskRecord>(json).is_err());
    }

    #[test]
    fn edge_flow_coercion() {
        let record = EdgeRecord {
            name: "mart_orders".to_string(),
            connection_name: "warehouse".to_string(),
            flow: "downstream".to_string(),
            asset_id: "a-2".to_string(),
            connection_id: "c-1".to_string(),
            entity: "mart_orders".to_string(),
        };

        let edge = record.into_edge().unwrap();
        assert_eq!(edge.flow, FlowDirection::Downstream);
        assert_eq!(edge.target.entity, "mart_orders");
    }

    #[test]
    fn unknown_flow_drops_the_edge() {
        let record = EdgeRecord {
            name: "x".to_string(),
            connection_name: String::new(),
            flow: "sideways".to_string(),
            asset_id: "a".to_string(),
            connection_id: "c".to_string(),
            entity: String::new(),
        };
        assert!(record.into_edge().is_none());
    }

    #[test]
    fn missing_entity_falls_back_to_name() {
        let record = EdgeRecord {
            name: "mart_orders".to_string(),
            connection_name: String::new(),
            flow: "downstream".to_string(),
            asset_id: "a".to_string(),
            connection_id: "c".to_string(),
            entity: String::new(),
        };
        assert_eq!(record.into_edge().unwrap().target.entity, "mart_orders");
    }
}
