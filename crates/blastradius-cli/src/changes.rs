//! Changed-file collection
//!
//! Either an explicit delimited list or the added/modified/removed file
//! lists of a CI push event payload.

use serde::Deserialize;

/// Parse an explicit changed-file list (comma or whitespace separated)
pub fn from_list(list: &str) -> Vec<String> {
    let mut files = Vec::new();
    for part in list.split(|c: char| c == ',' || c.is_whitespace()) {
        let part = part.trim();
        if !part.is_empty() && !files.iter().any(|f| f == part) {
            files.push(part.to_string());
        }
    }
    files
}

/// File lists carried by one commit entry in the event payload
#[derive(Debug, Default, Deserialize)]
struct CommitFiles {
    #[serde(default)]
    added: Vec<String>,
    #[serde(default)]
    modified: Vec<String>,
    #[serde(default)]
    removed: Vec<String>,
}

/// The subset of a CI event payload we read
#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    #[serde(default)]
    commits: Vec<CommitFiles>,
    #[serde(default)]
    head_commit: Option<CommitFiles>,
}

/// Collect changed files from a CI event payload
///
/// Added, modified, and removed lists all participate: a removed model
/// still seeds the traversal (its downstream assets are affected), and
/// the diff aggregator skips files missing at head on its own.
pub fn from_event_payload(json: &str) -> Result<Vec<String>, serde_json::Error> {
    fn push_all(commit: &CommitFiles, files: &mut Vec<String>) {
        for file in commit
            .added
            .iter()
            .chain(commit.modified.iter())
            .chain(commit.removed.iter())
        {
            if !files.iter().any(|f| f == file) {
                files.push(file.clone());
            }
        }
    }

    let payload: EventPayload = serde_json::from_str(json)?;

    let mut files = Vec::new();
    for commit in &payload.commits {
        push_all(commit, &mut files);
    }
    if let Some(head) = &payload.head_commit {
        push_all(head, &mut files);
    }

    Ok(files)
}
