//! Router-level doubles for the corpus and generator seams.

use ai_llm_service::{GenerationError, StatusCode};
use review_pipeline::generator::{GenerationFuture, ReviewGenerator};
use review_store::{CorpusFuture, ReviewCorpus, ReviewRecord, ReviewSummary, StoreError};
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub(crate) struct FakeCorpus {
    titles: Vec<String>,
    down: bool,
}

impl FakeCorpus {
    pub(crate) fn with_titles(titles: &[&str]) -> Self {
        Self {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            down: false,
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            titles: Vec::new(),
            down: true,
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.down {
            Err(StoreError::Qdrant("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl ReviewCorpus for FakeCorpus {
    fn insert<'a>(&'a self, _record: &'a ReviewRecord) -> CorpusFuture<'a, ()> {
        Box::pin(async move { self.check() })
    }

    fn find_by_changes<'a>(&'a self, _changes: &'a str) -> CorpusFuture<'a, Option<String>> {
        Box::pin(async move { self.check().map(|_| None) })
    }

    fn search_by_title<'a>(
        &'a self,
        title: &'a str,
        limit: u32,
    ) -> CorpusFuture<'a, Vec<ReviewSummary>> {
        Box::pin(async move {
            self.check()?;
            Ok(self
                .titles
                .iter()
                .filter(|t| t.contains(title))
                .take(limit as usize)
                .map(|t| ReviewSummary {
                    project: "billing".into(),
                    title: t.clone(),
                    review: format!("review of {t}"),
                })
                .collect())
        })
    }
}

pub(crate) enum FakeGenerator {
    Answer(&'static str),
    Backend,
    /// Waits for cancellation, then fails like an aborted HTTP call.
    Hang,
}

impl FakeGenerator {
    pub(crate) fn answering(text: &'static str) -> Self {
        Self::Answer(text)
    }

    pub(crate) fn failing_backend() -> Self {
        Self::Backend
    }

    pub(crate) fn hanging() -> Self {
        Self::Hang
    }
}

impl ReviewGenerator for FakeGenerator {
    fn generate<'a>(
        &'a self,
        _prompt: &'a str,
        cancel: &'a CancellationToken,
    ) -> GenerationFuture<'a> {
        Box::pin(async move {
            match self {
                Self::Answer(text) => Ok(text.to_string()),
                Self::Backend => Err(GenerationError::Backend {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: "upstream unavailable".into(),
                }),
                Self::Hang => {
                    cancel.cancelled().await;
                    Err(GenerationError::Transport("generation call cancelled".into()))
                }
            }
        })
    }
}
