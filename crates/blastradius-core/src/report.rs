//! Impact report shape (stable output format)

use crate::asset::ImpactRecord;
use crate::column::ColumnDiff;
use serde::{Deserialize, Serialize};

/// Non-fatal note attached to a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraversalNote {
    /// The depth ceiling was reached; deeper assets were not expanded
    DepthLimitReached { depth: u32 },

    /// The record ceiling was reached; the impact sets are partial
    RecordLimitReached { records: usize },
}

impl std::fmt::Display for TraversalNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepthLimitReached { depth } => write!(
                f,
                "traversal stopped at depth {depth}; deeper assets were not expanded"
            ),
            Self::RecordLimitReached { records } => write!(
                f,
                "traversal stopped after {records} records; the impact list is partial"
            ),
        }
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of changed models that matched a catalog task
    pub changed_models: usize,

    /// Number of direct impacts
    pub direct: usize,

    /// Number of indirect impacts
    pub indirect: usize,

    /// Number of files with a column-level diff
    pub files_with_column_changes: usize,
}

/// The top-level impact analysis result
///
/// Built once per run, immutable after assembly, handed to the rendering
/// and posting sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Changed model names that seeded the traversal
    pub changed_models: Vec<String>,

    /// Assets reachable in one hop from a seed
    pub direct_impacts: Vec<ImpactRecord>,

    /// Assets reachable only through two or more hops
    pub indirect_impacts: Vec<ImpactRecord>,

    /// Per-file column diffs
    pub column_diffs: Vec<ColumnDiff>,

    /// Non-fatal warnings collected during the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<TraversalNote>,

    /// Summary counts
    pub summary: ReportSummary,
}

impl ImpactReport {
    /// Whether the traversal found any downstream impact
    pub fn has_impacts(&self) -> bool {
        !self.direct_impacts.is_empty() || !self.indirect_impacts.is_empty()
    }

    /// All impact records, direct first
    pub fn all_impacts(&self) -> impl Iterator<Item = &ImpactRecord> {
        self.direct_impacts.iter().chain(self.indirect_impacts.iter())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
