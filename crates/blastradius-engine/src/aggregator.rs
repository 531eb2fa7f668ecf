//! Column diff aggregation over changed files
//!
//! For each changed model file, pulls before/after content from a
//! [`ContentSource`] and computes the column-level diff. A file missing
//! at head was deleted and is skipped; a file missing at base is new and
//! every column counts as added. Parse failures skip the file and the
//! rest keep processing.

use blastradius_core::{ColumnDescriptor, ColumnDiff};
use blastradius_extract::{diff_columns, extract_sql_columns, extract_yaml_columns, ExtractError};
use tracing::{debug, warn};

/// Retrieves a file's content at a given revision
///
/// `None` means the file does not exist at that revision.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch `path` as of `revision`
    async fn content(&self, revision: &str, path: &str) -> Option<String>;
}

/// Extraction format, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Sql,
    Yaml,
}

impl FileKind {
    fn of(path: &str) -> Option<Self> {
        let ext = std::path::Path::new(path).extension()?.to_str()?;
        match ext {
            "sql" => Some(Self::Sql),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn extract(self, content: &str) -> Result<Vec<ColumnDescriptor>, ExtractError> {
        match self {
            Self::Sql => extract_sql_columns(content),
            Self::Yaml => extract_yaml_columns(content),
        }
    }
}

/// Aggregates per-file column diffs between two revisions
pub struct DiffAggregator<'a> {
    source: &'a dyn ContentSource,
    base: String,
    head: String,
}

impl<'a> DiffAggregator<'a> {
    /// Create an aggregator for a base..head revision pair
    pub fn new(source: &'a dyn ContentSource, base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            source,
            base: base.into(),
            head: head.into(),
        }
    }

    /// Diff every recognized changed file
    pub async fn diff_files(&self, changed_files: &[String]) -> Vec<ColumnDiff> {
        let mut diffs = Vec::new();

        for file in changed_files {
            let Some(kind) = FileKind::of(file) else {
                continue;
            };

            let Some(after_content) = self.source.content(&self.head, file).await else {
                debug!(file = %file, "missing at head revision; skipping deleted file");
                continue;
            };

            let after = match kind.extract(&after_content) {
                Ok(columns) => columns,
                Err(e) => {
                    warn!(file = %file, error = %e, "column extraction failed; skipping file");
                    continue;
                }
            };

            let before = match self.source.content(&self.base, file).await {
                // Newly added file: empty before-set, all columns added.
                None => Vec::new(),
                Some(content) => match kind.extract(&content) {
                    Ok(columns) => columns,
                    Err(e) => {
                        warn!(file = %file, error = %e, "column extraction failed; skipping file");
                        continue;
                    }
                },
            };

            diffs.push(diff_columns(file.clone(), &before, &after));
        }

        diffs
    }
}
