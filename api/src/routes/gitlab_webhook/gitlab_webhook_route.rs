use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use review_pipeline::{MergeRequestEvent, ReviewOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::gitlab_webhook::gitlab_webhook_response::GitlabWebhookResponse,
};

/// POST /webhook/gitlab
///
/// Reviews a GitLab merge-request event and answers with the generated text.
/// Other event kinds are acknowledged with `{"status":"ignored"}`.
///
/// The whole review runs under the configured deadline. When it expires the
/// pipeline's token is cancelled: an in-flight lookup counts as "no match"
/// and an in-flight generation call fails as a transport error (504).
#[instrument(name = "gitlab_webhook_route", skip_all)]
pub async fn gitlab_webhook_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MergeRequestEvent>, JsonRejection>,
) -> AppResult<Json<GitlabWebhookResponse>> {
    let Json(event) = payload.inspect_err(|e| warn!(error = %e, "rejected webhook body"))?;

    let cancel = CancellationToken::new();
    let deadline = state.review_deadline;
    let review = state.pipeline.review(&event, &cancel);
    tokio::pin!(review);

    let outcome = tokio::select! {
        res = &mut review => res,
        _ = tokio::time::sleep(deadline) => {
            warn!(deadline_secs = deadline.as_secs(), "review deadline exceeded, cancelling");
            cancel.cancel();
            review.await
        }
    };

    match outcome? {
        ReviewOutcome::Ignored => Ok(Json(GitlabWebhookResponse::ignored())),
        ReviewOutcome::Reviewed(review) => {
            info!(review_len = review.len(), "review delivered");
            Ok(Json(GitlabWebhookResponse::reviewed(review)))
        }
    }
}
