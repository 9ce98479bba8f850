use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::similar_reviews::{
        similar_reviews_request::SimilarReviewsRequest,
        similar_reviews_response::SimilarReviewsResponse,
    },
};

/// Maximum number of reviews returned per lookup.
pub const SIMILAR_REVIEWS_LIMIT: u32 = 5;

/// POST /similar-reviews
///
/// Lists stored reviews whose title contains `query`. Read-only.
#[instrument(name = "similar_reviews_route", skip_all)]
pub async fn similar_reviews_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimilarReviewsRequest>, JsonRejection>,
) -> AppResult<Json<SimilarReviewsResponse>> {
    let Json(body) = payload?;
    let query = body.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("query must not be empty".into()));
    }

    let reviews = state
        .corpus
        .search_by_title(query, SIMILAR_REVIEWS_LIMIT)
        .await?;
    debug!(hits = reviews.len(), "similar reviews listed");

    Ok(Json(SimilarReviewsResponse { reviews }))
}
