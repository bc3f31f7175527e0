//! LLM Provider implementations

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Trait for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Get the provider kind
    fn kind(&self) -> ProviderKind;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Complete a conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

// ============================================================================
// Chat-completions wire format (shared by OpenAI and DeepSeek)
// ============================================================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: ChatContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Convert a request into chat messages.
///
/// Providers without vision get the image URL inlined as text.
fn chat_messages(request: &CompletionRequest, vision: bool) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(ref system) = request.system {
        messages.push(ChatMessage {
            role: MessageRole::System.as_str(),
            content: ChatContent::Text(system.clone()),
        });
    }

    for msg in &request.messages {
        let content = match (&msg.image_url, vision) {
            (Some(url), true) => ChatContent::Parts(vec![
                ContentPart::Text {
                    text: msg.content.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: url.clone() },
                },
            ]),
            (Some(url), false) => ChatContent::Text(format!("{}\n\nImage: {}", msg.content, url)),
            (None, _) => ChatContent::Text(msg.content.clone()),
        };
        messages.push(ChatMessage {
            role: msg.role.as_str(),
            content,
        });
    }

    messages
}

/// POST a chat-completions request and decode the first choice
async fn post_chat(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    chat_request: &ChatRequest,
) -> Result<CompletionResponse> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .json(chat_request)
        .send()
        .await
        .map_err(|e| LLMError::NetworkError {
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(LLMError::RequestFailed {
            message: format!("HTTP {}: {}", status, body),
        });
    }

    let chat_response: ChatResponse =
        response.json().await.map_err(|e| LLMError::InvalidResponse {
            message: e.to_string(),
        })?;

    let content = chat_response
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .ok_or_else(|| LLMError::InvalidResponse {
            message: "response contained no choices".to_string(),
        })?;

    let usage = chat_response.usage.unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
        model: chat_response.model.or_else(|| Some(chat_request.model.clone())),
    })
}

// ============================================================================
// OpenAI Provider
// ============================================================================

/// Configuration for OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl OpenAIConfig {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Reads `OPENAI_API_KEY`; `None` when it is unset or empty
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())?;
        Some(Self {
            api_key,
            model: std::env::var("BLOCKFIN_OPENAI_MODEL")
                .unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string()),
            base_url: std::env::var("BLOCKFIN_OPENAI_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// OpenAI API provider
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let chat_request = ChatRequest {
            messages: chat_messages(&request, true),
            model: request.model.unwrap_or_else(|| self.config.model.clone()),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        post_chat(
            &self.client,
            &self.config.base_url,
            &self.config.api_key,
            &chat_request,
        )
        .await
    }
}

// ============================================================================
// DeepSeek Provider
// ============================================================================

/// Configuration for DeepSeek provider
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl DeepSeekConfig {
    pub const DEFAULT_MODEL: &'static str = "deepseek-chat";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.deepseek.com/v1";

    /// Reads `DEEPSEEK_API_KEY`, falling back to `OPENAI_API_KEY`
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()))?;
        Some(Self {
            api_key,
            model: std::env::var("BLOCKFIN_DEEPSEEK_MODEL")
                .unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string()),
            base_url: std::env::var("BLOCKFIN_DEEPSEEK_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// DeepSeek API provider
pub struct DeepSeekProvider {
    config: DeepSeekConfig,
    client: reqwest::Client,
}

impl DeepSeekProvider {
    pub fn new(config: DeepSeekConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    fn name(&self) -> &'static str {
        "DeepSeek"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepSeek
    }

    async fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let chat_request = ChatRequest {
            // deepseek-chat has no image input
            messages: chat_messages(&request, false),
            model: request.model.unwrap_or_else(|| self.config.model.clone()),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        post_chat(
            &self.client,
            &self.config.base_url,
            &self.config.api_key,
            &chat_request,
        )
        .await
    }
}

// ============================================================================
// Deterministic Provider (Fallback)
// ============================================================================

/// Offline provider that echoes the prompt; never registered unless asked for
pub struct DeterministicProvider;

impl DeterministicProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeterministicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMProvider for DeterministicProvider {
    fn name(&self) -> &'static str {
        "Deterministic"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Deterministic
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let prompt = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.lines().next().unwrap_or_default().to_string())
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: format!(
                "AI insights are running in deterministic mode. Received: \"{}\"",
                prompt
            ),
            usage: TokenUsage::default(),
            model: Some("deterministic".to_string()),
        })
    }
}
