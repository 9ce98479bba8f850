//! In-memory doubles for the corpus and generator seams.

use std::sync::Mutex;
use std::time::Duration;

use ai_llm_service::{GenerationError, StatusCode};
use review_store::{CorpusFuture, ReviewCorpus, ReviewRecord, ReviewSummary, StoreError};
use tokio_util::sync::CancellationToken;

use crate::generator::{GenerationFuture, ReviewGenerator};

/// Corpus double that records every call.
#[derive(Default)]
pub(crate) struct FakeCorpus {
    similar: Option<String>,
    lookup_fails: bool,
    insert_fails: bool,
    delay: Option<Duration>,
    lookups: Mutex<Vec<String>>,
    insert_attempts: Mutex<Vec<ReviewRecord>>,
}

impl FakeCorpus {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_similar(review: &str) -> Self {
        Self {
            similar: Some(review.to_string()),
            ..Self::default()
        }
    }

    /// Every call fails as if Qdrant were down.
    pub(crate) fn unreachable() -> Self {
        Self {
            lookup_fails: true,
            insert_fails: true,
            ..Self::default()
        }
    }

    /// Lookups succeed with no match, inserts fail.
    pub(crate) fn failing_inserts() -> Self {
        Self {
            insert_fails: true,
            ..Self::default()
        }
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub(crate) fn insert_attempts(&self) -> Vec<ReviewRecord> {
        self.insert_attempts.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.lookups().len() + self.insert_attempts().len()
    }
}

fn down() -> StoreError {
    StoreError::Qdrant("transport error: connection refused".into())
}

impl ReviewCorpus for FakeCorpus {
    fn insert<'a>(&'a self, record: &'a ReviewRecord) -> CorpusFuture<'a, ()> {
        Box::pin(async move {
            self.insert_attempts.lock().unwrap().push(record.clone());
            if self.insert_fails { Err(down()) } else { Ok(()) }
        })
    }

    fn find_by_changes<'a>(&'a self, changes: &'a str) -> CorpusFuture<'a, Option<String>> {
        Box::pin(async move {
            self.lookups.lock().unwrap().push(changes.to_string());
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            if self.lookup_fails {
                Err(down())
            } else {
                Ok(self.similar.clone())
            }
        })
    }

    fn search_by_title<'a>(
        &'a self,
        _title: &'a str,
        _limit: u32,
    ) -> CorpusFuture<'a, Vec<ReviewSummary>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

/// Canned generator outcome.
pub(crate) enum Reply {
    Answer(&'static str),
    Backend(StatusCode),
}

/// Generator double that records every prompt.
pub(crate) struct FakeGenerator {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ReviewGenerator for FakeGenerator {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        _cancel: &'a CancellationToken,
    ) -> GenerationFuture<'a> {
        Box::pin(async move {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Reply::Answer(text) => Ok(text.to_string()),
                Reply::Backend(status) => Err(GenerationError::Backend {
                    status: *status,
                    body: "upstream unavailable".into(),
                }),
            }
        })
    }
}
