// Error types for forum-stats.
// Covers network failures, schema and date problems in API payloads, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForumError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema error: column `{column}` in record {record}: {reason}")]
    Schema {
        column: String,
        record: usize,
        reason: String,
    },

    #[error("Invalid timestamp `{value}` in column `{column}`")]
    Parse { column: String, value: String },

    #[error("Pagination limit exceeded: no terminal page after {pages} pages")]
    PaginationLimitExceeded { pages: u32 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForumError {
    /// Missing declared column.
    pub fn missing_column(column: &str, record: usize) -> Self {
        ForumError::Schema {
            column: column.to_string(),
            record,
            reason: "missing".to_string(),
        }
    }

    /// Cell present but not of the expected type.
    pub fn wrong_type(column: &str, record: usize, expected: &str) -> Self {
        ForumError::Schema {
            column: column.to_string(),
            record,
            reason: format!("expected {}", expected),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForumError>;
