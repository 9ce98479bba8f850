use serde::Serialize;

/// Response body of the GitLab webhook.
#[derive(Debug, Serialize)]
pub struct GitlabWebhookResponse {
    /// `"success"` or `"ignored"`.
    pub status: &'static str,
    /// Generated review; absent for ignored events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl GitlabWebhookResponse {
    pub fn ignored() -> Self {
        Self {
            status: "ignored",
            review: None,
        }
    }

    pub fn reviewed(review: String) -> Self {
        Self {
            status: "success",
            review: Some(review),
        }
    }
}
