//! Error channel for best-effort persistence.
//!
//! Generation failures use [`ai_llm_service::GenerationError`] and abort the
//! pipeline. Persistence failures use [`PersistError`], which the orchestrator
//! logs and drops.

use review_store::StoreError;
use thiserror::Error;

/// A review could not be appended to the corpus.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to store review: {0}")]
    Store(#[from] StoreError),
}
