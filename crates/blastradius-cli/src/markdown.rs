//! Markdown rendering of an impact report
//!
//! Produces the text posted as the PR comment and written to the CI job
//! summary. The report is always rendered, even when empty: a PR with no
//! matched models gets an explicit "no analysis possible" line rather
//! than silence.

use blastradius_core::{ImpactRecord, ImpactReport};
use std::fmt::Write;

/// Render a report to Markdown
pub fn render(report: &ImpactReport) -> String {
    let mut out = String::new();

    out.push_str("## Downstream impact analysis\n\n");

    if report.changed_models.is_empty() {
        out.push_str(
            "No impact analysis possible: none of the changed files matched a cataloged dbt model.\n",
        );
        return out;
    }

    let models: Vec<String> = report
        .changed_models
        .iter()
        .map(|m| format!("`{m}`"))
        .collect();
    let _ = writeln!(out, "**Changed models:** {}\n", models.join(", "));

    if !report.has_impacts() {
        out.push_str("No downstream assets are affected by this change.\n");
    } else {
        render_impacts(&mut out, "Direct impacts", &report.direct_impacts);
        render_impacts(&mut out, "Indirect impacts", &report.indirect_impacts);
    }

    let column_sections: Vec<_> = report.column_diffs.iter().filter(|d| !d.is_empty()).collect();
    if !column_sections.is_empty() {
        out.push_str("\n### Column changes\n\n");
        for diff in column_sections {
            let _ = writeln!(out, "**`{}`**\n", diff.file);
            for col in &diff.added {
                let _ = writeln!(out, "- Added `{}`", col.name);
            }
            for col in &diff.removed {
                let _ = writeln!(out, "- Removed `{}`", col.name);
            }
            for col in &diff.modified {
                let _ = writeln!(out, "- Modified `{}`", col.name);
            }
            out.push('\n');
        }
    }

    if !report.notes.is_empty() {
        out.push_str("\n> [!WARNING]\n");
        for note in &report.notes {
            let _ = writeln!(out, "> {note}");
        }
    }

    out
}

/// Render one impact partition as a table
fn render_impacts(out: &mut String, title: &str, records: &[ImpactRecord]) {
    let _ = writeln!(out, "### {title} ({})\n", records.len());

    if records.is_empty() {
        out.push_str("None.\n\n");
        return;
    }

    out.push_str("| Asset | Connection | Depth |\n");
    out.push_str("| --- | --- | --- |\n");
    for record in records {
        let _ = writeln!(
            out,
            "| `{}` | {} | {} |",
            record.name, record.connection_name, record.depth
        );
    }
    out.push('\n');
}
