//! Default generation config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GROQ_API_KEY`     = bearer credential (mandatory)
//! - `GROQ_URL`         = base endpoint (default `https://api.groq.com/openai`)
//! - `GROQ_MODEL`       = model id (default `deepseek-r1-distill-llama-70b`)
//! - `LLM_MAX_TOKENS`   = output cap (default `2000`)
//! - `LLM_TIMEOUT_SECS` = HTTP timeout (default `120`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, env_opt_u32, env_opt_u64, env_or, must_env, validate_http_endpoint},
};

/// Model used when `GROQ_MODEL` is not set.
pub const DEFAULT_GROQ_MODEL: &str = "deepseek-r1-distill-llama-70b";

/// Output cap used when `LLM_MAX_TOKENS` is not set.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Request timeout used when `LLM_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Constructs the review-generation config for Groq.
///
/// # Errors
///
/// - [`crate::error_handler::ConfigError::MissingVar`] if `GROQ_API_KEY` is missing
/// - [`crate::error_handler::ConfigError::InvalidFormat`] if `GROQ_URL` is not http(s)
/// - [`crate::error_handler::ConfigError::InvalidNumber`] for malformed numbers
pub fn config_groq_review() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GROQ_API_KEY")?;
    let endpoint = env_or("GROQ_URL", LlmProvider::Groq.default_endpoint());
    validate_http_endpoint("GROQ_URL", &endpoint)?;
    let model = env_or("GROQ_MODEL", DEFAULT_GROQ_MODEL);
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        provider: LlmProvider::Groq,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(max_tokens),
        timeout_secs: Some(timeout_secs),
    })
}
