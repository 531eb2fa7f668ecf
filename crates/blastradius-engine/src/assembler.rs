//! Report assembly
//!
//! Pure merge of the walk outcome and column diffs into the final report.
//! No I/O; inputs are consumed, never mutated.

use crate::walker::WalkOutcome;
use blastradius_core::{ColumnDiff, ImpactReport, ReportSummary};

/// Assemble the final report for one run
pub fn assemble(
    changed_models: Vec<String>,
    outcome: WalkOutcome,
    column_diffs: Vec<ColumnDiff>,
) -> ImpactReport {
    let summary = ReportSummary {
        changed_models: changed_models.len(),
        direct: outcome.direct.len(),
        indirect: outcome.indirect.len(),
        files_with_column_changes: column_diffs.iter().filter(|d| !d.is_empty()).count(),
    };

    ImpactReport {
        changed_models,
        direct_impacts: outcome.direct,
        indirect_impacts: outcome.indirect,
        column_diffs,
        notes: outcome.notes,
        summary,
    }
}
