use ai_llm_service::{AiLlmError, GenerationError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use review_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Body extraction failed; `status` comes from the rejection itself.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    // --- Downstream dependencies ---
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("review corpus unavailable: {0}")]
    Corpus(#[from] StoreError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,

            AppError::Generation(e) => match e {
                GenerationError::Transport(_) => StatusCode::GATEWAY_TIMEOUT,
                GenerationError::RequestConstruction(_) => StatusCode::INTERNAL_SERVER_ERROR,
                GenerationError::Backend { .. }
                | GenerationError::EmptyResponse
                | GenerationError::ResponseParse(_) => StatusCode::BAD_GATEWAY,
            },
            AppError::Corpus(_) => StatusCode::BAD_GATEWAY,

            // startup-only
            AppError::Config(_) | AppError::Llm(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Llm(_) => "LLM_CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Rejected { status, .. } => match *status {
                StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
                StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
                _ => "BAD_REQUEST",
            },
            AppError::Generation(e) => match e {
                GenerationError::Backend { .. } => "LLM_BACKEND_ERROR",
                GenerationError::Transport(_) => "LLM_UNREACHABLE",
                GenerationError::EmptyResponse => "LLM_EMPTY_RESPONSE",
                GenerationError::ResponseParse(_) => "LLM_BAD_RESPONSE",
                GenerationError::RequestConstruction(_) => "LLM_REQUEST_INVALID",
            },
            AppError::Corpus(_) => "CORPUS_UNAVAILABLE",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}
