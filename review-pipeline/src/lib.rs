//! Retrieval-augmented review of merge requests.
//!
//! Flow for one event:
//! 1) Skip anything that is not a merge-request event.
//! 2) Normalize the change set into one diff text.
//! 3) Retrieve the most similar past review (best-effort).
//! 4) Compose the prompt.
//! 5) Generate the review (hard dependency; failure aborts).
//! 6) Append the new review to the corpus (best-effort).
//!
//! Every stored review becomes a retrieval candidate for later events.

pub mod errors;
pub mod event;
pub mod generator;
pub mod normalize;
pub mod persister;
pub mod prompt;
pub mod retriever;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use ai_llm_service::GenerationError;
use chrono::Utc;
use review_store::{ReviewCorpus, ReviewRecord};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

pub use errors::PersistError;
pub use event::{ChangeSet, FileChange, MERGE_REQUEST_KIND, MergeRequestEvent};
pub use generator::ReviewGenerator;
pub use persister::ReviewPersister;
pub use retriever::SimilarityRetriever;

/// Successful result of [`ReviewPipeline::review`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The event was not a merge request; nothing was called.
    Ignored,
    /// Generated review text.
    Reviewed(String),
}

/// Sequences normalization, retrieval, prompt composition, generation and persistence.
///
/// Stateless between calls; the corpus is the only shared state.
#[derive(Clone)]
pub struct ReviewPipeline {
    retriever: SimilarityRetriever,
    persister: ReviewPersister,
    generator: Arc<dyn ReviewGenerator>,
}

impl ReviewPipeline {
    pub fn new(corpus: Arc<dyn ReviewCorpus>, generator: Arc<dyn ReviewGenerator>) -> Self {
        Self {
            retriever: SimilarityRetriever::new(corpus.clone()),
            persister: ReviewPersister::new(corpus),
            generator,
        }
    }

    /// Reviews one merge-request event.
    ///
    /// Retrieval and persistence are single best-effort attempts; their
    /// failures are logged and never returned. Only generation fails the call.
    /// `cancel` aborts in-flight retrieval (treated as no match) and
    /// generation (returned as [`GenerationError::Transport`]).
    ///
    /// # Errors
    /// Returns the [`GenerationError`] of the generation step unchanged.
    #[instrument(
        name = "review_merge_request",
        skip_all,
        fields(kind = %event.object_kind, project = %event.project.name)
    )]
    pub async fn review(
        &self,
        event: &MergeRequestEvent,
        cancel: &CancellationToken,
    ) -> Result<ReviewOutcome, GenerationError> {
        if !event.is_merge_request() {
            info!("event ignored");
            return Ok(ReviewOutcome::Ignored);
        }

        let attrs = &event.object_attributes;
        let diff = normalize::normalize_changes(&attrs.changes);
        info!(
            title = %attrs.title,
            files = attrs.changes.len(),
            diff_len = diff.len(),
            "reviewing merge request"
        );

        let similar = self.retriever.find_similar(&diff, cancel).await;
        let prompt = prompt::compose_review_prompt(&diff, similar.as_deref());

        let review = self
            .generator
            .generate(&prompt, cancel)
            .await
            .inspect_err(|e| warn!(error = %e, kind = e.kind(), "review generation failed"))?;

        let record = ReviewRecord {
            project: event.project.name.clone(),
            title: attrs.title.clone(),
            description: attrs.description.clone().unwrap_or_default(),
            changes: diff,
            review: review.clone(),
            timestamp: Utc::now(),
        };
        // Logged inside the persister; the caller gets the review regardless.
        let _ = self.persister.persist(&record).await;

        Ok(ReviewOutcome::Reviewed(review))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ai_llm_service::{ChatCompletionService, LlmModelConfig, LlmProvider, StatusCode};
    use axum::{Router, routing::post};

    use super::*;
    use crate::prompt::NO_SIMILAR_PLACEHOLDER;
    use crate::testing::{FakeCorpus, FakeGenerator, Reply};

    fn event(kind: &str, changes: &[(&str, &str)]) -> MergeRequestEvent {
        let changes: BTreeMap<String, FileChange> = changes
            .iter()
            .map(|(path, diff)| {
                (
                    path.to_string(),
                    FileChange {
                        diff: diff.to_string(),
                        old_path: path.to_string(),
                        new_path: path.to_string(),
                    },
                )
            })
            .collect();

        let mut ev = MergeRequestEvent::default();
        ev.object_kind = kind.to_string();
        ev.project.name = "billing".into();
        ev.object_attributes.title = "Add retry".into();
        ev.object_attributes.description = Some("Retries failed webhooks".into());
        ev.object_attributes.changes = changes;
        ev
    }

    fn pipeline(corpus: &Arc<FakeCorpus>, generator: Arc<dyn ReviewGenerator>) -> ReviewPipeline {
        ReviewPipeline::new(corpus.clone(), generator)
    }

    /// Real chat client pointed at a local server that always answers `body`.
    async fn backend_answering(status: StatusCode, body: &'static str) -> Arc<ChatCompletionService> {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || async move { (status, body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let cfg = LlmModelConfig {
            provider: LlmProvider::Groq,
            model: "test-model".into(),
            endpoint: format!("http://{addr}"),
            api_key: Some("test-key".into()),
            max_tokens: Some(2000),
            timeout_secs: Some(5),
        };
        Arc::new(ChatCompletionService::new(cfg).expect("service"))
    }

    #[tokio::test]
    async fn non_merge_request_is_ignored_without_calls() {
        let corpus = Arc::new(FakeCorpus::with_similar("x"));
        let generator = Arc::new(FakeGenerator::new(Reply::Answer("unused")));
        let p = pipeline(&corpus, generator.clone());

        let out = p
            .review(&event("issue", &[("a.rs", "+x")]), &CancellationToken::new())
            .await
            .expect("ignored is not an error");

        assert_eq!(out, ReviewOutcome::Ignored);
        assert_eq!(corpus.call_count(), 0);
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn scratchpad_is_stripped_and_review_persisted_once() {
        let corpus = Arc::new(FakeCorpus::empty());
        let backend = backend_answering(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"<think>scratch</think>Looks fine."}}]}"#,
        )
        .await;
        let p = pipeline(&corpus, backend);

        let out = p
            .review(
                &event(MERGE_REQUEST_KIND, &[("src/lib.rs", "+x")]),
                &CancellationToken::new(),
            )
            .await
            .expect("review");

        assert_eq!(out, ReviewOutcome::Reviewed("Looks fine.".into()));

        let stored = corpus.insert_attempts();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].review, "Looks fine.");
        assert_eq!(stored[0].changes, "File: src/lib.rs\nDiff:\n+x\n\n");
        assert_eq!(stored[0].project, "billing");
        assert_eq!(stored[0].title, "Add retry");
        assert_eq!(stored[0].description, "Retries failed webhooks");
        assert_eq!(corpus.lookups(), vec!["File: src/lib.rs\nDiff:\n+x\n\n".to_string()]);
    }

    #[tokio::test]
    async fn zero_candidates_fails_without_persisting() {
        let corpus = Arc::new(FakeCorpus::empty());
        let backend = backend_answering(StatusCode::OK, r#"{"choices":[]}"#).await;
        let p = pipeline(&corpus, backend);

        let err = p
            .review(
                &event(MERGE_REQUEST_KIND, &[("src/lib.rs", "+x")]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::EmptyResponse));
        assert!(corpus.insert_attempts().is_empty());
    }

    #[tokio::test]
    async fn backend_status_failure_propagates_without_persisting() {
        let corpus = Arc::new(FakeCorpus::empty());
        let generator = Arc::new(FakeGenerator::new(Reply::Backend(
            StatusCode::SERVICE_UNAVAILABLE,
        )));
        let p = pipeline(&corpus, generator);

        let err = p
            .review(&event(MERGE_REQUEST_KIND, &[("a.rs", "+x")]), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            GenerationError::Backend { status, .. } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(corpus.insert_attempts().is_empty());
    }

    #[tokio::test]
    async fn unreachable_corpus_still_produces_review() {
        let corpus = Arc::new(FakeCorpus::unreachable());
        let generator = Arc::new(FakeGenerator::new(Reply::Answer("LGTM")));
        let p = pipeline(&corpus, generator.clone());

        let out = p
            .review(&event(MERGE_REQUEST_KIND, &[("a.rs", "+x")]), &CancellationToken::new())
            .await
            .expect("storage problems are invisible to the caller");

        assert_eq!(out, ReviewOutcome::Reviewed("LGTM".into()));
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(NO_SIMILAR_PLACEHOLDER));
        assert_eq!(corpus.insert_attempts().len(), 1);
    }

    #[tokio::test]
    async fn persistence_failure_is_invisible() {
        let corpus = Arc::new(FakeCorpus::failing_inserts());
        let generator = Arc::new(FakeGenerator::new(Reply::Answer("Ship it.")));
        let p = pipeline(&corpus, generator);

        let out = p
            .review(&event(MERGE_REQUEST_KIND, &[("a.rs", "+x")]), &CancellationToken::new())
            .await
            .expect("review");
        assert_eq!(out, ReviewOutcome::Reviewed("Ship it.".into()));
        assert_eq!(corpus.insert_attempts().len(), 1);
    }

    #[tokio::test]
    async fn retrieved_review_grounds_the_prompt() {
        let corpus = Arc::new(FakeCorpus::with_similar("Watch for N+1 queries."));
        let generator = Arc::new(FakeGenerator::new(Reply::Answer("ok")));
        let p = pipeline(&corpus, generator.clone());

        p.review(&event(MERGE_REQUEST_KIND, &[("a.rs", "+x")]), &CancellationToken::new())
            .await
            .expect("review");

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Watch for N+1 queries."));
        assert!(!prompt.contains(NO_SIMILAR_PLACEHOLDER));
        assert!(prompt.contains("File: a.rs\nDiff:\n+x\n\n"));
    }

    #[tokio::test]
    async fn empty_change_set_skips_retrieval_but_still_reviews() {
        let corpus = Arc::new(FakeCorpus::with_similar("unused"));
        let generator = Arc::new(FakeGenerator::new(Reply::Answer("Nothing to review.")));
        let p = pipeline(&corpus, generator);

        let out = p
            .review(&event(MERGE_REQUEST_KIND, &[]), &CancellationToken::new())
            .await
            .expect("review");

        assert_eq!(out, ReviewOutcome::Reviewed("Nothing to review.".into()));
        assert!(corpus.lookups().is_empty());
        let stored = corpus.insert_attempts();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].changes, "");
    }
}
