//! Review corpus: the persisted collection of generated merge-request reviews.
//!
//! The corpus supports exactly three operations:
//! - append one [`ReviewRecord`] (never updated, never deleted here),
//! - look up the review of the first record whose diff contains a given text,
//! - list records whose title contains a given text.
//!
//! [`ReviewCorpus`] is the seam the pipeline talks to; [`ReviewStore`] is the
//! Qdrant-backed implementation.

mod config;
mod errors;
mod filters;
mod qdrant_facade;
mod record;

pub use config::{DEFAULT_COLLECTION, StoreConfig};
pub use errors::StoreError;
pub use record::{
    FIELD_CHANGES, FIELD_DESCRIPTION, FIELD_PROJECT, FIELD_REVIEW, FIELD_TIMESTAMP, FIELD_TITLE,
    ReviewRecord, ReviewSummary,
};

use std::{future::Future, pin::Pin};

use tracing::{debug, instrument, trace};

/// Boxed future returned by [`ReviewCorpus`] operations.
pub type CorpusFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Storage interface for the review corpus.
///
/// Implementations must distinguish "no results" (`Ok(None)` / empty list)
/// from transport or query failures (`Err`).
pub trait ReviewCorpus: Send + Sync {
    /// Appends one record.
    fn insert<'a>(&'a self, record: &'a ReviewRecord) -> CorpusFuture<'a, ()>;

    /// Returns the review text of the first record whose `changes` contains `changes`.
    fn find_by_changes<'a>(&'a self, changes: &'a str) -> CorpusFuture<'a, Option<String>>;

    /// Returns up to `limit` records whose `title` contains `title`.
    fn search_by_title<'a>(
        &'a self,
        title: &'a str,
        limit: u32,
    ) -> CorpusFuture<'a, Vec<ReviewSummary>>;
}

/// Qdrant-backed corpus.
pub struct ReviewStore {
    client: qdrant_facade::QdrantFacade,
}

impl ReviewStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Config` for invalid settings, `StoreError::Qdrant`
    /// if the client cannot be built.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        trace!("ReviewStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { client })
    }

    /// Provisions the collection; an existing collection counts as success.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if Qdrant is unreachable or rejects the schema.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.client.ensure_collection().await
    }

    #[instrument(skip_all, fields(collection = %self.client.collection, project = %record.project))]
    async fn insert_record(&self, record: &ReviewRecord) -> Result<(), StoreError> {
        self.client.insert(record.to_payload_json()).await
    }

    #[instrument(skip_all, fields(collection = %self.client.collection, query_len = changes.len()))]
    async fn first_review_with_changes(&self, changes: &str) -> Result<Option<String>, StoreError> {
        let hits = self
            .client
            .scroll(filters::text_contains(FIELD_CHANGES, changes), 1)
            .await?;
        let review = hits
            .first()
            .map(|payload| record::str_field(payload, FIELD_REVIEW));
        debug!(found = review.is_some(), "changes lookup finished");
        Ok(review)
    }

    #[instrument(skip_all, fields(collection = %self.client.collection, limit = limit))]
    async fn summaries_with_title(
        &self,
        title: &str,
        limit: u32,
    ) -> Result<Vec<ReviewSummary>, StoreError> {
        let hits = self
            .client
            .scroll(filters::text_contains(FIELD_TITLE, title), limit)
            .await?;
        Ok(hits.iter().map(ReviewSummary::from_payload).collect())
    }
}

impl ReviewCorpus for ReviewStore {
    fn insert<'a>(&'a self, record: &'a ReviewRecord) -> CorpusFuture<'a, ()> {
        Box::pin(self.insert_record(record))
    }

    fn find_by_changes<'a>(&'a self, changes: &'a str) -> CorpusFuture<'a, Option<String>> {
        Box::pin(self.first_review_with_changes(changes))
    }

    fn search_by_title<'a>(
        &'a self,
        title: &'a str,
        limit: u32,
    ) -> CorpusFuture<'a, Vec<ReviewSummary>> {
        Box::pin(self.summaries_with_title(title, limit))
    }
}
