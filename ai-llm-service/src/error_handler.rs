//! Unified error handling for `ai-llm-service`.
//!
//! Two error families live here:
//!
//! - [`AiLlmError`] covers setup: reading/validating configuration and building
//!   the HTTP client. These errors only happen at startup.
//! - [`GenerationError`] covers a single generation call. Each variant is one
//!   failure kind the caller can branch on (request construction, transport,
//!   backend status, empty answer, malformed payload).
//!
//! Small helpers for reading/validating environment variables are provided and
//! return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for setup-time operations.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level setup error                                                     */
/* ------------------------------------------------------------------------- */

/// Top-level setup error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("[AI LLM Service] transport setup error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GROQ_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,

    /// The backend requires a bearer credential and none was configured.
    #[error("[AI LLM Service] missing API key")]
    MissingApiKey,
}

/* ------------------------------------------------------------------------- */
/* Generation errors                                                         */
/* ------------------------------------------------------------------------- */

/// Failure of a single generation call.
///
/// Exactly one variant per failure kind; callers match on it to pick a
/// response status. Nothing here is retried by this crate.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The outgoing request could not be built (bad header, bad URL, body
    /// serialization). Fatal for this call.
    #[error("[AI LLM Service] failed to construct request: {0}")]
    RequestConstruction(String),

    /// Network/connection failure, timeout, or cancellation of the in-flight call.
    #[error("[AI LLM Service] transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("[AI LLM Service] backend returned HTTP {status}: {body}")]
    Backend {
        /// HTTP status returned by the backend.
        status: StatusCode,
        /// Trimmed snippet of the response body.
        body: String,
    },

    /// The backend answered successfully but with zero candidate answers.
    #[error("[AI LLM Service] backend returned no candidate answers")]
    EmptyResponse,

    /// The backend payload could not be decoded.
    #[error("[AI LLM Service] failed to parse response: {0}")]
    ResponseParse(String),
}

impl GenerationError {
    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::RequestConstruction(_) => "RequestConstructionError",
            GenerationError::Transport(_) => "TransportError",
            GenerationError::Backend { .. } => "BackendError",
            GenerationError::EmptyResponse => "EmptyResponseError",
            GenerationError::ResponseParse(_) => "ResponseParseError",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            return GenerationError::RequestConstruction(e.to_string());
        }
        if e.is_timeout() {
            return GenerationError::Transport(format!("request timed out: {e}"));
        }
        GenerationError::Transport(e.to_string())
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Fetches an optional environment variable, falling back to `default` when
/// unset or blank.
pub fn env_or(name: &'static str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidNumber`] if the
/// variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Trims a response body to a short single-line snippet for errors and logs.
pub fn make_snippet(text: &str) -> String {
    const MAX_CHARS: usize = 240;
    let flat = text.trim().replace(['\n', '\r'], " ");
    if flat.chars().count() <= MAX_CHARS {
        flat
    } else {
        let mut s: String = flat.chars().take(MAX_CHARS).collect();
        s.push('…');
        s
    }
}
