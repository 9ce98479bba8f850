use serde::Deserialize;

/// Request body for the similar-reviews lookup.
#[derive(Debug, Deserialize)]
pub struct SimilarReviewsRequest {
    /// Text to look for inside stored titles.
    #[serde(default)]
    pub query: String,
}
