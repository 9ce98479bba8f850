/// Backend used for review generation.
///
/// The provider speaks the OpenAI chat-completions protocol
/// (`POST {endpoint}/v1/chat/completions` with bearer auth), so it only decides
/// defaults such as the base endpoint.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// assert_eq!(LlmProvider::Groq.default_endpoint(), "https://api.groq.com/openai");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Groq's OpenAI-compatible API.
    Groq,
}

impl LlmProvider {
    /// Base endpoint used when none is configured explicitly.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            LlmProvider::Groq => "https://api.groq.com/openai",
        }
    }
}
