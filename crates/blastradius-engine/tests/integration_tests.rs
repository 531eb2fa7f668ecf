//! End-to-end engine tests: seed resolution -> walk -> diff -> assemble

use blastradius_catalog::{resolve_seeds, CatalogSource, MockCatalog};
use blastradius_core::{
    AssetIdentity, CatalogTask, FlowDirection, IdentityKey, LineageEdge, MatchMode,
    TraversalLimits,
};
use blastradius_engine::{assemble, ContentSource, DiffAggregator, ImpactWalker};
use std::collections::HashMap;

fn task(name: &str) -> CatalogTask {
    CatalogTask {
        name: name.to_string(),
        connection_type: "dbt".to_string(),
        connection_id: "c-1".to_string(),
        connection_name: "warehouse".to_string(),
        asset_id: format!("a-{name}"),
        task_id: "nightly".to_string(),
    }
}

fn edge(entity: &str) -> LineageEdge {
    LineageEdge {
        target: AssetIdentity::new(format!("a-{entity}"), "c-1", entity),
        name: entity.to_string(),
        connection_name: "warehouse".to_string(),
        flow: FlowDirection::Downstream,
    }
}

#[derive(Default)]
struct MemorySource {
    files: HashMap<(String, String), String>,
}

impl MemorySource {
    fn with(mut self, revision: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((revision.to_string(), path.to_string()), content.to_string());
        self
    }
}

#[async_trait::async_trait]
impl ContentSource for MemorySource {
    async fn content(&self, revision: &str, path: &str) -> Option<String> {
        self.files
            .get(&(revision.to_string(), path.to_string()))
            .cloned()
    }
}

#[tokio::test]
async fn full_pipeline_produces_a_complete_report() {
    let orders = task("orders");
    let mock = MockCatalog::new()
        .with_task(orders.clone())
        .with_downstream(&orders.identity(), vec![edge("mart_orders"), edge("mart_finance")])
        .with_downstream(
            &AssetIdentity::new("a-mart_orders", "c-1", "mart_orders"),
            vec![edge("dashboard_orders")],
        );

    let changed_files = vec!["models/marts/orders.sql".to_string()];

    // Seed resolution against the catalog.
    let tasks = mock.list_tasks().await;
    let seeds = resolve_seeds(&tasks, &changed_files, MatchMode::Loose);
    assert_eq!(seeds.len(), 1);

    let changed_models: Vec<String> = seeds.iter().map(|s| s.model.clone()).collect();
    let identities: Vec<AssetIdentity> = seeds.iter().map(|s| s.task.identity()).collect();

    // Graph walk.
    let walker = ImpactWalker::new(&mock, IdentityKey::AssetTriple, TraversalLimits::default());
    let outcome = walker.walk(&identities).await;

    // Column diffs.
    let source = MemorySource::default()
        .with("base", "models/marts/orders.sql", "SELECT id, name FROM raw")
        .with("head", "models/marts/orders.sql", "SELECT id, name, email FROM raw");
    let diffs = DiffAggregator::new(&source, "base", "head")
        .diff_files(&changed_files)
        .await;

    let report = assemble(changed_models, outcome, diffs);

    assert_eq!(report.changed_models, vec!["orders"]);
    assert_eq!(report.summary.direct, 2);
    assert_eq!(report.summary.indirect, 1);
    assert_eq!(report.summary.files_with_column_changes, 1);
    assert_eq!(report.column_diffs[0].added[0].name, "email");
    assert!(report.notes.is_empty());

    // The report is serializable for the machine-readable output.
    let json = report.to_json().unwrap();
    assert!(json.contains("mart_orders"));
    assert!(json.contains("dashboard_orders"));
}

#[tokio::test]
async fn unmatched_changes_yield_an_empty_but_valid_report() {
    let mock = MockCatalog::new().with_task(task("orders"));
    let changed_files = vec!["models/unknown_model.sql".to_string()];

    let tasks = mock.list_tasks().await;
    let seeds = resolve_seeds(&tasks, &changed_files, MatchMode::Loose);
    assert!(seeds.is_empty());

    let walker = ImpactWalker::new(&mock, IdentityKey::AssetTriple, TraversalLimits::default());
    let outcome = walker.walk(&[]).await;

    let report = assemble(Vec::new(), outcome, Vec::new());
    assert!(!report.has_impacts());
    assert_eq!(report.summary.changed_models, 0);
}
