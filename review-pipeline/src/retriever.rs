//! Similarity retrieval over the review corpus.
//!
//! Retrieval only enriches the prompt. Every failure (transport, query,
//! cancellation) is logged and reported as "no match".

use std::sync::Arc;

use review_store::ReviewCorpus;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Looks up the single most relevant past review for a normalized diff.
#[derive(Clone)]
pub struct SimilarityRetriever {
    corpus: Arc<dyn ReviewCorpus>,
}

impl SimilarityRetriever {
    pub fn new(corpus: Arc<dyn ReviewCorpus>) -> Self {
        Self { corpus }
    }

    /// Returns the review of the first stored record whose diff contains
    /// `diff`, or `None` when there is no match or the lookup failed.
    ///
    /// An empty `diff` has nothing to match and skips the corpus call.
    pub async fn find_similar(&self, diff: &str, cancel: &CancellationToken) -> Option<String> {
        if diff.is_empty() {
            debug!("empty diff, skipping similarity lookup");
            return None;
        }

        let lookup = self.corpus.find_by_changes(diff);
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("similarity lookup cancelled, continuing without a past review");
                return None;
            }
            res = lookup => res,
        };

        match result {
            Ok(Some(review)) => {
                debug!(review_len = review.len(), "similar review found");
                Some(review)
            }
            Ok(None) => {
                debug!("no similar review in corpus");
                None
            }
            Err(err) => {
                warn!(error = %err, "similarity lookup failed, continuing without a past review");
                None
            }
        }
    }
}
