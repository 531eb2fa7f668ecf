//! BlastRadius Core
//!
//! Core domain model shared by every other crate: asset identities,
//! catalog tasks, lineage edges, impact records, column diffs, and the
//! final report shape. No I/O lives here.

pub mod asset;
pub mod column;
pub mod config;
pub mod report;

pub use asset::{
    AssetIdentity, CatalogTask, Classification, FlowDirection, IdentityKey, ImpactRecord,
    LineageEdge,
};
pub use column::{ColumnDescriptor, ColumnDiff, ModifiedColumn};
pub use config::{ApiConfig, Config, ConfigError, MatchMode, TraversalLimits};
pub use report::{ImpactReport, ReportSummary, TraversalNote};
