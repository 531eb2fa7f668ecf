//! In-memory catalog/lineage source for tests
//!
//! Returns predefined tasks and edges without touching the network, and
//! can simulate a lineage failure for specific assets (which surfaces as
//! an empty edge list, exactly like the real client).

use crate::{CatalogSource, LineageSource};
use blastradius_core::{AssetIdentity, CatalogTask, IdentityKey, LineageEdge};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Mock source implementing both catalog and lineage surfaces
#[derive(Debug, Default)]
pub struct MockCatalog {
    tasks: Vec<CatalogTask>,
    edges: HashMap<String, Vec<LineageEdge>>,
    failures: HashSet<String>,
}

impl MockCatalog {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog task
    pub fn with_task(mut self, task: CatalogTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Predefine downstream edges for an asset
    pub fn with_downstream(mut self, identity: &AssetIdentity, edges: Vec<LineageEdge>) -> Self {
        self.edges.insert(IdentityKey::AssetTriple.of(identity), edges);
        self
    }

    /// Simulate a lineage failure for an asset
    pub fn with_failure(mut self, identity: &AssetIdentity) -> Self {
        self.failures.insert(IdentityKey::AssetTriple.of(identity));
        self
    }
}

#[async_trait::async_trait]
impl CatalogSource for MockCatalog {
    async fn list_tasks(&self) -> Vec<CatalogTask> {
        self.tasks.clone()
    }
}

#[async_trait::async_trait]
impl LineageSource for MockCatalog {
    async fn downstream(&self, identity: &AssetIdentity) -> Vec<LineageEdge> {
        let key = IdentityKey::AssetTriple.of(identity);
        if self.failures.contains(&key) {
            warn!(asset = %identity, "simulated lineage failure; treating as leaf");
            return Vec::new();
        }
        self.edges.get(&key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blastradius_core::FlowDirection;

    fn edge(entity: &str) -> LineageEdge {
        LineageEdge {
            target: AssetIdentity::new(format!("a-{entity}"), "c-1", entity),
            name: entity.to_string(),
            connection_name: "warehouse".to_string(),
            flow: FlowDirection::Downstream,
        }
    }

    #[tokio::test]
    async fn returns_configured_edges() {
        let seed = AssetIdentity::new("a-seed", "c-1", "seed");
        let mock = MockCatalog::new().with_downstream(&seed, vec![edge("b"), edge("c")]);

        let edges = mock.downstream(&seed).await;
        assert_eq!(edges.len(), 2);
    }

    #[tokio::test]
    async fn unknown_asset_is_a_leaf() {
        let mock = MockCatalog::new();
        let edges = mock.downstream(&AssetIdentity::new("a", "c", "x")).await;
        assert!(edges.is_empty());
    }

    #[tokio::test]
    async fn failure_surfaces_as_empty() {
        let seed = AssetIdentity::new("a-seed", "c-1", "seed");
        let mock = MockCatalog::new()
            .with_downstream(&seed, vec![edge("b")])
            .with_failure(&seed);

        assert!(mock.downstream(&seed).await.is_empty());
    }
}
