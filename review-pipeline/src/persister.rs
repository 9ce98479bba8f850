//! Append-only persistence of generated reviews.

use std::sync::Arc;

use review_store::{ReviewCorpus, ReviewRecord};
use tracing::{info, warn};

use crate::errors::PersistError;

/// Writes generated reviews into the corpus. One insert per call, no upsert.
#[derive(Clone)]
pub struct ReviewPersister {
    corpus: Arc<dyn ReviewCorpus>,
}

impl ReviewPersister {
    pub fn new(corpus: Arc<dyn ReviewCorpus>) -> Self {
        Self { corpus }
    }

    /// Appends `record`. Failures are logged here and returned for the caller to drop.
    pub async fn persist(&self, record: &ReviewRecord) -> Result<(), PersistError> {
        match self.corpus.insert(record).await {
            Ok(()) => {
                info!(project = %record.project, title = %record.title, "review stored");
                Ok(())
            }
            Err(err) => {
                warn!(
                    error = %err,
                    project = %record.project,
                    title = %record.title,
                    "failed to store review"
                );
                Err(err.into())
            }
        }
    }
}
