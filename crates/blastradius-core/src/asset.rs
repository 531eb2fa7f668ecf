//! Asset identity, catalog task, and lineage edge types

use serde::{Deserialize, Serialize};

/// Identity of a cataloged asset
///
/// The triple is the canonical identity: two assets are the same entity
/// iff all three fields match exactly. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetIdentity {
    /// Catalog asset id
    pub asset_id: String,

    /// Connection the asset belongs to
    pub connection_id: String,

    /// Entity name disambiguating a task/table within the connection
    pub entity: String,
}

impl AssetIdentity {
    /// Create a new asset identity
    pub fn new(
        asset_id: impl Into<String>,
        connection_id: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            connection_id: connection_id.into(),
            entity: entity.into(),
        }
    }
}

impl std::fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.connection_id, self.asset_id, self.entity)
    }
}

/// Which fields define "the same asset" for dedup and visited-set checks
///
/// The source catalogs are inconsistent about this, so the walker is
/// parameterized over the key instead of hard-coding one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKey {
    /// Full `{asset_id, connection_id, entity}` triple (canonical)
    AssetTriple,

    /// `{entity, connection_id}` pair, ignoring the asset id
    NameKey,
}

impl IdentityKey {
    /// Render the membership key for an identity under this scheme
    pub fn of(&self, identity: &AssetIdentity) -> String {
        match self {
            Self::AssetTriple => format!(
                "{}:{}:{}",
                identity.asset_id, identity.connection_id, identity.entity
            ),
            Self::NameKey => format!("{}:{}", identity.entity, identity.connection_id),
        }
    }
}

impl Default for IdentityKey {
    fn default() -> Self {
        Self::AssetTriple
    }
}

/// A named pipeline entry from the catalog
///
/// Produced by the catalog client; read-only to the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTask {
    /// Task name (matches the model file basename for dbt tasks)
    pub name: String,

    /// Connection type, e.g. "dbt"
    pub connection_type: String,

    /// Connection id
    pub connection_id: String,

    /// Human-readable connection name
    pub connection_name: String,

    /// Catalog asset id
    pub asset_id: String,

    /// Pipeline job/task id
    pub task_id: String,
}

impl CatalogTask {
    /// Whether this task comes from a dbt connection
    pub fn is_dbt(&self) -> bool {
        self.connection_type == "dbt"
    }

    /// The identity under which this task appears in lineage
    pub fn identity(&self) -> AssetIdentity {
        AssetIdentity::new(&self.asset_id, &self.connection_id, &self.name)
    }
}

/// Direction of a lineage edge relative to the queried asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Upstream,
    Downstream,
    #[serde(rename = "self")]
    SelfRef,
}

/// A directed dependency edge returned by the lineage API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageEdge {
    /// Identity of the asset on the far end of the edge
    pub target: AssetIdentity,

    /// Display name of the target asset
    pub name: String,

    /// Connection name of the target asset
    pub connection_name: String,

    /// Flow direction relative to the queried asset
    pub flow: FlowDirection,
}

/// How a discovered asset relates to the changed seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Reachable in exactly one lineage hop from a seed
    Direct,

    /// Reachable only through two or more chained hops
    Indirect,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Indirect => write!(f, "indirect"),
        }
    }
}

/// A downstream asset discovered during traversal
///
/// The record set for one traversal run is owned by that run; nothing is
/// shared across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactRecord {
    /// Identity of the impacted asset
    pub identity: AssetIdentity,

    /// Display name
    pub name: String,

    /// Connection name
    pub connection_name: String,

    /// Hop count from the nearest seed (1 = direct)
    pub depth: u32,

    /// Direct or indirect impact
    pub classification: Classification,
}

impl ImpactRecord {
    /// Build a record from a lineage edge discovered at the given depth
    pub fn from_edge(edge: &LineageEdge, depth: u32, classification: Classification) -> Self {
        Self {
            identity: edge.target.clone(),
            name: edge.name.clone(),
            connection_name: edge.connection_name.clone(),
            depth,
            classification,
        }
    }
}
