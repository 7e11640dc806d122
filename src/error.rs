//! Error types for packing and for the command-line driver.

use thiserror::Error;

/// Errors raised by the container and bucket sorter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// An addition would push a container past its ceiling.
    #[error("current size of {attempted} is bigger than the max size of {max_size}")]
    CapacityExceeded { attempted: i64, max_size: u64 },

    /// An item reported a size below zero.
    #[error("invalid size {size} for item {id}")]
    InvalidSize { id: String, size: i64 },

    #[error("invalid bucket granularity {0}: must be greater than 0")]
    InvalidGranularity(u64),

    #[error("invalid target size {0}: must be greater than 0")]
    InvalidTarget(u64),
}

/// Errors surfaced by the driver and CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable root path could be resolved for scanning.
    #[error("No path resolved: {0}")]
    NoPathResolved(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Pack(#[from] PackError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}
