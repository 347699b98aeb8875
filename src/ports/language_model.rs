//! Language Model Port - Interface for LLM provider integrations.
//!
//! Abstracts the chat-completion provider so the agent engine, router and
//! generators never couple to a concrete API. Implementations translate
//! between this request shape and the provider's wire format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a message sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    System,
    User,
    Assistant,
}

/// A message in a model conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMessage {
    pub role: ModelRole,
    pub content: String,
}

impl ModelMessage {
    pub fn new(role: ModelRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ModelRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ModelRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ModelRole::Assistant, content)
    }
}

/// Request for a single completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ModelMessage>,
    /// Ask the provider to constrain output to a JSON object.
    pub json_response: bool,
    /// Overrides the provider's configured temperature when set.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            json_response: false,
            temperature: None,
        }
    }

    pub fn with_message(mut self, role: ModelRole, content: impl Into<String>) -> Self {
        self.messages.push(ModelMessage::new(role, content));
        self
    }

    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for CompletionRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Port for chat-completion providers.
///
/// All calls are blocking from the caller's point of view; no timeout is
/// enforced here beyond what the implementation configures on its client.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a single completion and return its text content.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError>;
}

/// Provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl ModelError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_accumulates_messages() {
        let request = CompletionRequest::new()
            .with_message(ModelRole::System, "You are a router.")
            .with_message(ModelRole::User, "hello")
            .with_json_response();

        assert_eq!(request.messages.len(), 2);
        assert!(request.json_response);
        assert_eq!(request.messages[1].content, "hello");
    }

    #[test]
    fn model_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ModelRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&ModelRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
