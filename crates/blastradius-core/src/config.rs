//! Configuration schema (blastradius.toml + environment overrides)
//!
//! All configuration is an explicit struct handed to each client
//! constructor; there is no ambient process-wide state.

use crate::asset::IdentityKey;
use serde::{Deserialize, Serialize};

/// Catalog/lineage API connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog/lineage service
    #[serde(default)]
    pub base_url: String,

    /// Client id half of the credential pair
    #[serde(default)]
    pub client_id: String,

    /// Client secret half of the credential pair
    #[serde(default)]
    pub client_secret: String,
}

impl ApiConfig {
    /// Override fields from `BLASTRADIUS_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("BLASTRADIUS_API_URL") {
            self.base_url = url;
        }
        if let Ok(id) = std::env::var("BLASTRADIUS_CLIENT_ID") {
            self.client_id = id;
        }
        if let Ok(secret) = std::env::var("BLASTRADIUS_CLIENT_SECRET") {
            self.client_secret = secret;
        }
    }

    /// Check that every required field is present
    ///
    /// Must be called before any network call so that a missing credential
    /// fails the run up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingField("api.base_url"));
        }
        if self.client_id.is_empty() {
            return Err(ConfigError::MissingField("api.client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(ConfigError::MissingField("api.client_secret"));
        }
        Ok(())
    }
}

/// Task-to-file matching strictness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Match on task name alone
    Loose,

    /// Match on task name plus a job/path-segment match
    Strict,
}

impl Default for MatchMode {
    fn default() -> Self {
        Self::Loose
    }
}

/// Defensive ceilings for the graph walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalLimits {
    /// Maximum hop depth expanded from any seed
    #[serde(default = "TraversalLimits::default_max_depth")]
    pub max_depth: u32,

    /// Maximum total impact records collected across a walk
    #[serde(default = "TraversalLimits::default_max_records")]
    pub max_records: usize,
}

impl TraversalLimits {
    fn default_max_depth() -> u32 {
        50
    }

    fn default_max_records() -> usize {
        10_000
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::default_max_depth(),
            max_records: Self::default_max_records(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Task matching strictness
    #[serde(default)]
    pub matching: MatchMode,

    /// Identity key scheme used for dedup and visited-set membership
    #[serde(default)]
    pub identity_key: IdentityKey,

    /// Traversal ceilings
    #[serde(default)]
    pub limits: TraversalLimits,
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing required config field: {0}")]
    MissingField(&'static str),
}
