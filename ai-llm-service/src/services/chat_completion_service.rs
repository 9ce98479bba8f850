//! Chat-completions client used to generate merge-request reviews.
//!
//! Minimal, non-streaming client around an OpenAI-compatible REST API
//! (Groq by default). The endpoint is derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions
//!
//! Constructor validation:
//! - `cfg.model` must not be empty
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Each call sends two turns (system, then user), carries the configured
//! `max_tokens`, and authenticates with a bearer credential. The first
//! candidate answer is returned with any `<think>` scratchpad removed.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ConfigError, GenerationError, make_snippet, validate_http_endpoint},
    sanitize::strip_think_tags,
};

/// System instruction sent with every review request.
pub const REVIEW_SYSTEM_PROMPT: &str = "You are a senior software engineer reviewing code changes. \
Provide detailed, constructive feedback focusing on best practices, security, and performance.";

/// Thin client for a chat-completions backend.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` with the configured timeout.
#[derive(Debug)]
pub struct ChatCompletionService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    api_key: String,
    url_chat: String,
}

impl ChatCompletionService {
    /// Creates a new [`ChatCompletionService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] if `cfg.model` is blank
    /// - [`ConfigError::MissingApiKey`] if `cfg.api_key` is `None` or blank
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is not http(s)
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        validate_http_endpoint("endpoint", cfg.endpoint.trim())?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let url_chat = cfg.chat_url();

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            max_tokens = cfg.max_tokens,
            timeout_secs = timeout.as_secs(),
            "ChatCompletionService initialized"
        );

        Ok(Self {
            client,
            cfg,
            api_key,
            url_chat,
        })
    }

    /// Generates a review for `prompt` using [`REVIEW_SYSTEM_PROMPT`].
    ///
    /// # Errors
    /// See [`ChatCompletionService::generate`].
    pub async fn generate_review(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, GenerationError> {
        self.generate(REVIEW_SYSTEM_PROMPT, prompt, cancel).await
    }

    /// Performs one **non-streaming** chat completion.
    ///
    /// If `cancel` fires while the call is in flight, the request is dropped
    /// and the call fails with [`GenerationError::Transport`].
    ///
    /// # Errors
    /// - [`GenerationError::RequestConstruction`] if the request cannot be built
    /// - [`GenerationError::Transport`] for network failures, timeouts, cancellation
    /// - [`GenerationError::Backend`] for non-2xx responses
    /// - [`GenerationError::ResponseParse`] if the JSON cannot be decoded
    /// - [`GenerationError::EmptyResponse`] if no candidate carries content
    #[instrument(skip_all, fields(model = %self.cfg.model, prompt_len = prompt.len()))]
    pub async fn generate(
        &self,
        system: &str,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, GenerationError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, system, prompt);

        let request = self
            .client
            .post(&self.url_chat)
            .bearer_auth(&self.api_key)
            .json(&body)
            .build()
            .map_err(|e| GenerationError::RequestConstruction(e.to_string()))?;

        debug!("POST {}", self.url_chat);

        let exchange = async {
            let resp = self.client.execute(request).await?;
            let status = resp.status();
            let text = resp.text().await?;
            Ok::<(StatusCode, String), GenerationError>((status, text))
        };

        let (status, text) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(
                    latency_ms = started.elapsed().as_millis(),
                    "generation call cancelled"
                );
                return Err(GenerationError::Transport("generation call cancelled".into()));
            }
            res = exchange => res.inspect_err(|e| {
                error!(
                    error = %e,
                    latency_ms = started.elapsed().as_millis(),
                    "chat completion transport failure"
                );
            })?,
        };

        if !status.is_success() {
            let snippet = make_snippet(&text);
            error!(
                %status,
                url = %self.url_chat,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned non-success status"
            );
            return Err(GenerationError::Backend {
                status,
                body: snippet,
            });
        }

        let answer = parse_first_answer(&text)?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            answer_len = answer.len(),
            "chat completion completed"
        );

        Ok(strip_think_tags(&answer))
    }
}

/// Extracts the first candidate's content from a chat-completions payload.
fn parse_first_answer(text: &str) -> Result<String, GenerationError> {
    let out: ChatCompletionResponse = serde_json::from_str(text).map_err(|e| {
        GenerationError::ResponseParse(format!(
            "serde error: {e}; expected `choices[0].message.content`"
        ))
    })?;

    out.choices
        .into_iter()
        .find_map(|c| c.message.content)
        .ok_or(GenerationError::EmptyResponse)
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, system: &'a str, prompt: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}
