use std::{sync::Arc, time::Duration};

use review_pipeline::ReviewPipeline;
use review_store::{DEFAULT_COLLECTION, ReviewCorpus, StoreConfig};
use thiserror::Error;

/// Listener address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3000";

/// Per-webhook deadline used when `REVIEW_DEADLINE_SECS` is not set.
pub const DEFAULT_REVIEW_DEADLINE_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value in {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
    },
}

/// Server-level settings loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listener address, e.g. `0.0.0.0:3000`.
    pub address: String,
    /// Overall budget for one webhook review.
    pub review_deadline: Duration,
    /// Corpus connection settings.
    pub store: StoreConfig,
}

impl ApiConfig {
    /// Load settings from environment variables.
    ///
    /// `QDRANT_URL` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let qdrant_url = env_opt("QDRANT_URL").ok_or(ConfigError::MissingVar("QDRANT_URL"))?;

        let review_deadline = match env_opt("REVIEW_DEADLINE_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "REVIEW_DEADLINE_SECS",
                    expected: "a positive number of seconds",
                })?,
            None => DEFAULT_REVIEW_DEADLINE_SECS,
        };

        Ok(Self {
            address: env_opt("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            review_deadline: Duration::from_secs(review_deadline),
            store: StoreConfig {
                qdrant_url,
                qdrant_api_key: env_opt("QDRANT_API_KEY"),
                collection: env_opt("REVIEW_COLLECTION")
                    .unwrap_or_else(|| DEFAULT_COLLECTION.into()),
            },
        })
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Review pipeline used by the webhook.
    pub pipeline: ReviewPipeline,
    /// Corpus handle for read-only lookups.
    pub corpus: Arc<dyn ReviewCorpus>,
    /// Deadline applied to each webhook review.
    pub review_deadline: Duration,
}
