use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Main router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL of the OpenAI-compatible provider
    pub api_base: String,
    /// Bearer token for the provider
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model used for content and math completions
    pub chat_model: String,
    /// Model used for image generation
    pub image_model: String,
    /// Timeout for one provider call, in seconds
    pub request_timeout_secs: u64,
    /// Maximum accepted JSON body size in bytes
    pub max_payload_size: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout_secs: 120,
            max_payload_size: 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl RouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}
