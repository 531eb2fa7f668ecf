//! GitHub sinks: PR comment and job summary
//!
//! Posting is best-effort and only attempted when a PR context exists.
//! A missing context skips the comment without error; a failed post is
//! logged by the caller, never fatal.

use std::io::Write;
use tracing::debug;

/// Errors from the GitHub comment API
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    /// The HTTP request itself failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub returned a non-2xx status code
    #[error("GitHub API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Posts comments to the pull request that triggered the run
pub struct GithubReporter {
    client: reqwest::Client,
    api_base: String,
    token: String,
    repo: String,
    pr_number: u64,
}

impl GithubReporter {
    /// Build a reporter from the CI environment, if a PR context exists
    ///
    /// Requires `GITHUB_TOKEN`, `GITHUB_REPOSITORY`, and a PR number from
    /// either `GITHUB_REF` (`refs/pull/<n>/merge`) or the event payload.
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok()?;
        let repo = std::env::var("GITHUB_REPOSITORY").ok()?;

        let pr_number = std::env::var("GITHUB_REF")
            .ok()
            .and_then(|r| pr_number_from_ref(&r))
            .or_else(pr_number_from_event)?;

        Some(Self {
            client: reqwest::Client::new(),
            api_base: "https://api.github.com".to_string(),
            token,
            repo,
            pr_number,
        })
    }

    /// Post a comment on the pull request
    pub async fn post_comment(&self, body: &str) -> Result<(), PostError> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_base, self.repo, self.pr_number
        );
        let payload = serde_json::json!({ "body": body });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "blastradius")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PostError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Extract a PR number from a `refs/pull/<n>/...` ref
pub fn pr_number_from_ref(git_ref: &str) -> Option<u64> {
    let rest = git_ref.strip_prefix("refs/pull/")?;
    let number = rest.split('/').next()?;
    number.parse().ok()
}

/// Extract a PR number from the CI event payload, if any
fn pr_number_from_event() -> Option<u64> {
    let path = std::env::var("GITHUB_EVENT_PATH").ok()?;
    let json = std::fs::read_to_string(path).ok()?;
    let payload: serde_json::Value = serde_json::from_str(&json).ok()?;

    payload
        .get("pull_request")
        .and_then(|pr| pr.get("number"))
        .or_else(|| payload.get("number"))
        .and_then(serde_json::Value::as_u64)
}

/// Append rendered Markdown to the CI job summary, when the surface exists
///
/// Returns whether anything was written.
pub fn write_job_summary(markdown: &str) -> std::io::Result<bool> {
    let Ok(path) = std::env::var("GITHUB_STEP_SUMMARY") else {
        debug!("GITHUB_STEP_SUMMARY not set; skipping job summary");
        return Ok(false);
    };

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(markdown.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(true)
}
