//! Web search provider configuration (Serper)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Serper web-search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Serper API key
    pub serper_api_key: Secret<String>,

    /// Search endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// How many top snippets to return
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl SearchConfig {
    pub fn api_key(&self) -> &str {
        self.serper_api_key.expose_secret()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.serper_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SERPER_API_KEY"));
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://google.serper.dev/search".to_string()
}

fn default_top_k() -> usize {
    3
}
