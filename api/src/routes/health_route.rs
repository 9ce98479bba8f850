use axum::Json;
use serde_json::{Value, json};

/// GET /health
///
/// Liveness only; does not touch the corpus or the generation backend.
pub async fn health_route() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
