//! HTTP client for the catalog/lineage service
//!
//! One [`reqwest::Client`] shared across both surfaces. The typed fetch
//! methods return [`ApiError`]; the [`CatalogSource`]/[`LineageSource`]
//! impls degrade errors to empty results with a warning, per the
//! availability-over-completeness policy.

use crate::api::{LineageResponse, TaskPage};
use crate::{CatalogSource, LineageSource};
use blastradius_core::{ApiConfig, AssetIdentity, CatalogTask, FlowDirection, LineageEdge};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Page size for the bulk task listing
const TASK_PAGE_LIMIT: usize = 500;

/// Errors from the catalog/lineage HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decode)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code
    #[error("catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body for debugging
        body: String,
    },
}

/// Client for a single catalog/lineage service
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client from validated connection settings
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the full task list, paging until a short page
    pub async fn fetch_tasks(&self) -> Result<Vec<CatalogTask>, ApiError> {
        let mut tasks = Vec::new();
        let mut offset = 0usize;

        loop {
            let page: TaskPage = self
                .get_json(
                    "tasks",
                    &[
                        ("offset", offset.to_string()),
                        ("limit", TASK_PAGE_LIMIT.to_string()),
                    ],
                )
                .await?;

            let count = page.tasks.len();
            tasks.extend(page.tasks.into_iter().map(CatalogTask::from));

            if count < TASK_PAGE_LIMIT {
                break;
            }
            offset += count;
        }

        debug!(count = tasks.len(), "fetched catalog tasks");
        Ok(tasks)
    }

    /// Fetch downstream edges for one asset
    ///
    /// Filters to downstream flow and drops self-edges before returning.
    pub async fn fetch_downstream(
        &self,
        identity: &AssetIdentity,
    ) -> Result<Vec<LineageEdge>, ApiError> {
        let response: LineageResponse = self
            .get_json(
                &format!("lineage/{}", identity.asset_id),
                &[
                    ("connectionId", identity.connection_id.clone()),
                    ("entity", identity.entity.clone()),
                ],
            )
            .await?;

        let edges: Vec<LineageEdge> = response
            .edges
            .into_iter()
            .filter_map(|record| record.into_edge())
            .filter(|edge| edge.flow == FlowDirection::Downstream)
            .filter(|edge| edge.name != identity.entity)
            .collect();

        debug!(asset = %identity, count = edges.len(), "fetched downstream edges");
        Ok(edges)
    }

    /// Issue an authenticated GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(url)
            .query(query)
            .header("X-Client-Id", &self.config.client_id)
            .header("X-Client-Secret", &self.config.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl CatalogSource for ApiClient {
    async fn list_tasks(&self) -> Vec<CatalogTask> {
        match self.fetch_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "task listing failed; continuing with no tasks");
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl LineageSource for ApiClient {
    async fn downstream(&self, identity: &AssetIdentity) -> Vec<LineageEdge> {
        match self.fetch_downstream(identity).await {
            Ok(edges) => edges,
            Err(e) => {
                warn!(asset = %identity, error = %e, "lineage fetch failed; treating as leaf");
                Vec::new()
            }
        }
    }
}
