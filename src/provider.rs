//! Generative-AI capabilities the handlers depend on, plus an
//! OpenAI-compatible implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Decoding parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Parameters for one image generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageParams {
    pub n: u32,
    pub size: String,
    pub quality: String,
    pub style: String,
}

#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Returns the first generated completion, or `None` when the provider
    /// produced nothing.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> ProviderResult<Option<String>>;
}

#[async_trait]
pub trait ImageGeneration: Send + Sync {
    /// Returns the URLs of the generated images, possibly empty.
    async fn generate(&self, prompt: &str, params: &ImageParams) -> ProviderResult<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// Client for an OpenAI-compatible REST API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
    chat_model: String,
    image_model: String,
}

impl OpenAiClient {
    pub fn new(
        client: Client,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        chat_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        OpenAiClient {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            chat_model: chat_model.into(),
            image_model: image_model.into(),
        }
    }

    pub fn api_path(&self, api_path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        if api_path.starts_with('/') {
            format!("{}{}", base, api_path)
        } else {
            format!("{}/{}", base, api_path)
        }
    }

    async fn post_json(
        &self,
        api_path: &str,
        body: &serde_json::Value,
    ) -> ProviderResult<bytes::Bytes> {
        let resp = self
            .client
            .post(self.api_path(api_path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes)
    }
}

#[async_trait]
impl TextCompletion for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> ProviderResult<Option<String>> {
        let body = json!({
            "model": self.chat_model,
            "messages": messages,
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });
        let bytes = self.post_json("/chat/completions", &body).await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content))
    }
}

#[async_trait]
impl ImageGeneration for OpenAiClient {
    async fn generate(&self, prompt: &str, params: &ImageParams) -> ProviderResult<Vec<String>> {
        let body = json!({
            "model": self.image_model,
            "prompt": prompt,
            "n": params.n,
            "size": params.size,
            "quality": params.quality,
            "style": params.style,
        });
        let bytes = self.post_json("/images/generations", &body).await?;
        let parsed: ImageGenerationResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.data.into_iter().filter_map(|d| d.url).collect())
    }
}
