//! Git-backed file content retrieval
//!
//! Reads a file as of a revision with `git show <rev>:<path>`. A missing
//! file (deleted, not yet added, unknown revision) is `None`, matching
//! the [`ContentSource`] contract.

use blastradius_engine::ContentSource;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Content source backed by the local git checkout
pub struct GitContentSource {
    repo_dir: PathBuf,
}

impl GitContentSource {
    /// Create a source rooted at a repository checkout
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for GitContentSource {
    async fn content(&self, revision: &str, path: &str) -> Option<String> {
        let output = Command::new("git")
            .arg("show")
            .arg(format!("{revision}:{path}"))
            .current_dir(&self.repo_dir)
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            debug!(revision, path, "git show failed; treating file as absent");
            return None;
        }

        String::from_utf8(output.stdout).ok()
    }
}
