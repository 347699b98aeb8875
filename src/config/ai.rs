//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration (OpenAI-compatible API)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the OpenAI-compatible endpoint
    pub openai_api_key: Secret<String>,

    /// Base URL of the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat model used by agents, the router and generators
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Embedding model used by the document index
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Image model used for generated documents
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Sampling temperature for chat completions
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    pub fn api_key(&self) -> &str {
        self.openai_api_key.expose_secret()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.openai_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        let config = AiConfig {
            openai_api_key: Secret::new(String::new()),
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            image_model: default_image_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_converts_to_duration() {
        let config = AiConfig {
            openai_api_key: Secret::new("sk-xxx".to_string()),
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            image_model: default_image_model(),
            temperature: default_temperature(),
            timeout_secs: 60,
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }
}
