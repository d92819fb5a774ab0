//! Error types shared across GRIDNAV crates

use thiserror::Error;

/// Errors raised outside the search itself: malformed requests, bad
/// configuration and I/O. Search outcomes (unreachable goal, blocked
/// endpoints) are reported through `PlanFailure` in `gridnav_library`.
#[derive(Debug, Error)]
pub enum GridnavError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GridnavError {
    /// Shorthand for [`GridnavError::InvalidRequest`]
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        GridnavError::InvalidRequest(msg.into())
    }

    /// Shorthand for [`GridnavError::Config`]
    pub fn config(msg: impl Into<String>) -> Self {
        GridnavError::Config(msg.into())
    }
}

/// Result type for GRIDNAV operations
pub type GridnavResult<T> = Result<T, GridnavError>;
