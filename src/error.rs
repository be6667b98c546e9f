//! Error types for MargaNav

use thiserror::Error;

/// MargaNav error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("Connection failed: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("No progress toward waypoint {cursor} within the cycle budget")]
    TargetTimeout { cursor: usize },
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for MargaError {
    fn from(e: serde_json::Error) -> Self {
        MargaError::Protocol(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
