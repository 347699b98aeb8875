//! OpenAI-compatible provider: chat completions, embeddings and images.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AiConfig;
use crate::ports::{
    CompletionRequest, EmbeddingModel, ImageGenerator, LanguageModel, ModelError, ModelRole,
};

pub struct OpenAiProvider {
    config: AiConfig,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: AiConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ModelError::InvalidRequest(e.to_string()))?;
        Ok(Self { config, client })
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, ModelError> {
        let response = self
            .client
            .post(format!("{}/{}", self.config.base_url, path))
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout {
                        timeout_secs: self.config.timeout_secs as u32,
                    }
                } else if e.is_connect() {
                    ModelError::network(format!("connection failed: {e}"))
                } else {
                    ModelError::network(e.to_string())
                }
            })?;
        self.check_status(response).await
    }

    async fn check_status(&self, response: Response) -> Result<Response, ModelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => Err(ModelError::AuthenticationFailed),
            429 => Err(ModelError::RateLimited {
                retry_after_secs: parse_retry_after(&body),
            }),
            400 => Err(ModelError::InvalidRequest(body)),
            500..=599 => Err(ModelError::unavailable(format!(
                "server error {status}: {body}"
            ))),
            _ => Err(ModelError::network(format!(
                "unexpected status {status}: {body}"
            ))),
        }
    }
}

/// OpenAI sometimes embeds "try again in Xs" in the rate-limit message.
fn parse_retry_after(body: &str) -> u32 {
    const DEFAULT: u32 = 30;
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) else {
        return DEFAULT;
    };
    let Some(message) = parsed
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    else {
        return DEFAULT;
    };
    let Some(idx) = message.find("try again in ") else {
        return DEFAULT;
    };
    let rest = &message[idx + 13..];
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(DEFAULT)
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: WireMessage,
}

#[async_trait]
impl LanguageModel for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    ModelRole::System => "system",
                    ModelRole::User => "user",
                    ModelRole::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            })
            .collect();

        let body = ChatRequest {
            model: self.config.chat_model.clone(),
            messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            response_format: request
                .json_response
                .then_some(ResponseFormat { kind: "json_object" }),
        };

        let response = self.post("chat/completions", &body).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ModelError::parse("response contained no choices"))?;
        debug!(model = %self.config.chat_model, chars = content.len(), "completion received");
        Ok(content)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: String,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingModel for OpenAiProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let body = EmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: texts,
        };
        let response = self.post("embeddings", &body).await?;
        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(e.to_string()))?;
        // The API is allowed to return data out of order.
        parsed.data.sort_by_key(|d| d.index);
        if parsed.data.len() != texts.len() {
            return Err(ModelError::parse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[derive(Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    n: u32,
    response_format: &'static str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    b64_json: String,
}

#[async_trait]
impl ImageGenerator for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ModelError> {
        let body = ImageRequest {
            model: self.config.image_model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            response_format: "b64_json",
        };
        let response = self.post("images/generations", &body).await?;
        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(e.to_string()))?;
        let datum = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::parse("response contained no images"))?;
        BASE64
            .decode(datum.b64_json.as_bytes())
            .map_err(|e| ModelError::parse(format!("image payload is not valid base64: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_after_is_parsed_from_error_message() {
        let body = r#"{"error": {"message": "Rate limit reached, please try again in 7s."}}"#;
        assert_eq!(parse_retry_after(body), 7);
        assert_eq!(parse_retry_after("{}"), 30);
        assert_eq!(parse_retry_after("garbage"), 30);
    }
}
