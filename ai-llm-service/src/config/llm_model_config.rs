use crate::config::llm_provider::LlmProvider;

/// Configuration for the generation backend.
///
/// # Fields
///
/// - `provider`: Which backend to use (e.g., Groq).
/// - `model`: The model identifier (e.g., `"deepseek-r1-distill-llama-70b"`).
/// - `endpoint`: Base API URL; `/v1/chat/completions` is appended.
/// - `api_key`: Bearer credential attached to every call.
/// - `max_tokens`: Output cap sent with each request.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Groq,
///     model: "deepseek-r1-distill-llama-70b".to_string(),
///     endpoint: "https://api.groq.com/openai".to_string(),
///     api_key: Some("gsk-...".to_string()),
///     max_tokens: Some(2000),
///     timeout_secs: Some(120),
/// };
/// assert_eq!(cfg.chat_url(), "https://api.groq.com/openai/v1/chat/completions");
/// ```
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// The backend provider.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Base API URL.
    pub endpoint: String,

    /// API key for bearer authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Full URL of the chat-completions endpoint.
    pub fn chat_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim().trim_end_matches('/')
        )
    }
}
