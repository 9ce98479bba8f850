//! Review generation over an OpenAI-compatible chat-completions backend.
//!
//! - [`config`]: model/endpoint configuration and env-driven defaults.
//! - [`services::chat_completion_service`]: the HTTP client.
//! - [`sanitize`]: removal of `<think>` scratchpad spans from answers.
//! - [`error_handler`]: setup errors, per-call [`GenerationError`], env helpers.

pub mod config;
pub mod error_handler;
pub mod sanitize;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError, GenerationError};
pub use reqwest::StatusCode;
pub use services::chat_completion_service::{ChatCompletionService, REVIEW_SYSTEM_PROMPT};
