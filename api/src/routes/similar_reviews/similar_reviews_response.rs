use review_store::ReviewSummary;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SimilarReviewsResponse {
    pub reviews: Vec<ReviewSummary>,
}
