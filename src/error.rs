use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while reading provider round data.
#[derive(Error, Debug)]
pub enum RoundError {
    #[error("failed to read round file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse round data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("round data has no open draw")]
    NoDraw,

    #[error("invalid value for {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Round(#[from] RoundError),

    #[error("search task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
