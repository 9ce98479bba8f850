mod core;
mod error_handler;
mod routes;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use ai_llm_service::{ChatCompletionService, config::default_config::config_groq_review};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use review_pipeline::ReviewPipeline;
use review_store::ReviewStore;
use tokio::signal;
use tracing::{info, warn};

pub use crate::core::app_state::{ApiConfig, AppState, ConfigError};
pub use crate::error_handler::AppError;

use crate::routes::{
    gitlab_webhook::gitlab_webhook_route::gitlab_webhook_route, health_route::health_route,
    similar_reviews::similar_reviews_route::similar_reviews_route,
};

/// Loads configuration, provisions the corpus and serves until Ctrl+C.
///
/// # Errors
/// Any configuration problem, an unreachable corpus at startup, or a
/// listener failure stops the process.
pub async fn start() -> Result<(), AppError> {
    let config = ApiConfig::from_env()?;

    let store = ReviewStore::new(config.store.clone())?;
    store.ensure_schema().await?;
    let corpus = Arc::new(store);

    let generator = Arc::new(ChatCompletionService::new(config_groq_review()?)?);

    let state = AppState {
        pipeline: ReviewPipeline::new(corpus.clone(), generator),
        corpus,
        review_deadline: config.review_deadline,
    };

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.address, collection = %config.store.collection, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// HTTP routes over the given state.
///
/// The webhook body is unbounded: merge-request events carry whole diffs.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/webhook/gitlab",
            post(gitlab_webhook_route).layer(DefaultBodyLimit::disable()),
        )
        .route("/similar-reviews", post(similar_reviews_route))
        .route("/health", get(health_route))
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
