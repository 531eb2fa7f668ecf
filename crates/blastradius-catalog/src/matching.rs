//! Task-to-changed-file matching
//!
//! A catalog task is relevant to a changed file when it comes from a dbt
//! connection and its name equals the file's basename without extension.
//! Strict mode additionally requires the task's job id to appear as a
//! path segment of the changed file.

use blastradius_core::{CatalogTask, MatchMode};
use std::collections::HashSet;
use std::path::Path;

/// File extensions recognized as model files
const MODEL_EXTENSIONS: [&str; 3] = ["sql", "yml", "yaml"];

/// A changed model matched to its catalog task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMatch {
    /// Model name (file basename without extension)
    pub model: String,

    /// The matched catalog task
    pub task: CatalogTask,
}

/// Model name of a changed path, if it is a model file
pub fn model_name_of(path: &str) -> Option<String> {
    let path = Path::new(path);
    let ext = path.extension()?.to_str()?;
    if !MODEL_EXTENSIONS.contains(&ext) {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

/// Match changed files against the task list
///
/// One `SeedMatch` per distinct (model, task identity) pair; a task
/// matched through several files appears once.
pub fn resolve_seeds(
    tasks: &[CatalogTask],
    changed_files: &[String],
    mode: MatchMode,
) -> Vec<SeedMatch> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for file in changed_files {
        let Some(model) = model_name_of(file) else {
            continue;
        };

        for task in tasks {
            if !task.is_dbt() || task.name != model {
                continue;
            }
            if mode == MatchMode::Strict && !path_has_segment(file, &task.task_id) {
                continue;
            }

            let key = (model.clone(), task.asset_id.clone(), task.connection_id.clone());
            if seen.insert(key) {
                matches.push(SeedMatch {
                    model: model.clone(),
                    task: task.clone(),
                });
            }
        }
    }

    matches
}

/// Whether any directory segment of `path` equals `segment`
fn path_has_segment(path: &str, segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    Path::new(path)
        .parent()
        .map(|parent| {
            parent
                .components()
                .any(|c| c.as_os_str().to_str() == Some(segment))
        })
        .unwrap_or(false)
}
