//! Seam between the pipeline and the generation backend.

use std::{future::Future, pin::Pin};

use ai_llm_service::{ChatCompletionService, GenerationError};
use tokio_util::sync::CancellationToken;

/// Boxed future returned by [`ReviewGenerator::generate`].
pub type GenerationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;

/// Produces review text for a composed prompt.
///
/// Implementations return the cleaned answer (no scratchpad markup) and must
/// map a fired `cancel` token to [`GenerationError::Transport`].
pub trait ReviewGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str, cancel: &'a CancellationToken)
    -> GenerationFuture<'a>;
}

impl ReviewGenerator for ChatCompletionService {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        cancel: &'a CancellationToken,
    ) -> GenerationFuture<'a> {
        Box::pin(self.generate_review(prompt, cancel))
    }
}
