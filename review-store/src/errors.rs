//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for corpus operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Qdrant client errors (transport, query, schema), wrapped.
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// A record could not be converted to or from a point payload.
    #[error("payload error: {0}")]
    Payload(String),
}

impl From<qdrant_client::QdrantError> for StoreError {
    fn from(e: qdrant_client::QdrantError) -> Self {
        StoreError::Qdrant(e.to_string())
    }
}
