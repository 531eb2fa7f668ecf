//! Catalog and lineage access
//!
//! Source traits for the two remote surfaces the engine consumes, the
//! reqwest-backed client implementing both, the task-to-file matching
//! predicate, and an in-memory mock for tests.

pub mod api;
pub mod client;
pub mod matching;
pub mod mock;

pub use client::{ApiClient, ApiError};
pub use matching::{model_name_of, resolve_seeds, SeedMatch};
pub use mock::MockCatalog;

use blastradius_core::{AssetIdentity, CatalogTask, LineageEdge};

/// Resolves the full task list from the catalog service
///
/// Best-effort: implementations log transport failures and return an
/// empty list rather than raising, so callers treat "no tasks" as a valid
/// (if degenerate) outcome.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every cataloged task
    async fn list_tasks(&self) -> Vec<CatalogTask>;
}

/// Resolves immediate downstream neighbors of an asset
///
/// Implementations filter to downstream flow and drop self-edges before
/// returning. A transport failure is returned as an empty list, the same
/// signal as a true leaf.
#[async_trait::async_trait]
pub trait LineageSource: Send + Sync {
    /// Fetch the downstream edges of one asset
    async fn downstream(&self, identity: &AssetIdentity) -> Vec<LineageEdge>;
}
