//! Connection and collection configuration.

use crate::errors::StoreError;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "merge_request_reviews";

/// Configuration for the review corpus.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Fixed collection holding every review record.
    pub collection: String,
}

impl StoreConfig {
    /// Creates a config for the default collection at the given endpoint.
    pub fn new_default(url: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        let url = self.qdrant_url.trim();
        if url.is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StoreError::Config(format!(
                "qdrant_url must start with http:// or https://, got {url}"
            )));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        Ok(())
    }
}
