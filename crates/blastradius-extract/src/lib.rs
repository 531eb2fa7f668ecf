//! Column extraction and diffing
//!
//! Pulls declared column sets out of model files (SQL select lists and
//! dbt-style YAML schema files) and computes added/removed/modified sets
//! between two revisions of the same file.

pub mod diff;
pub mod sql;
pub mod yaml;

pub use diff::diff_columns;
pub use sql::extract_sql_columns;
pub use yaml::extract_yaml_columns;

/// Errors from column extraction
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("SQL parse error: {0}")]
    SqlParse(String),

    #[error("no SELECT statement found")]
    NoSelect,

    #[error("YAML parse error: {0}")]
    YamlParse(String),
}
