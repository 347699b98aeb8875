//! Serper web-search adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SearchConfig;
use crate::ports::{SearchError, SearchProvider};

pub struct SerperSearch {
    config: SearchConfig,
    client: Client,
}

impl SerperSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl SearchProvider for SerperSearch {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("X-API-KEY", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&SearchRequest {
                q: query,
                num: self.config.top_k,
            })
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Degrade instead of failing; the agent surfaces this snippet.
            return Ok(vec![format!("search request failed with status {status}")]);
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        debug!(query, results = parsed.organic.len(), "web search completed");

        Ok(parsed
            .organic
            .into_iter()
            .take(self.config.top_k)
            .map(|r| {
                if r.title.is_empty() {
                    r.snippet
                } else {
                    format!("{}: {}", r.title, r.snippet)
                }
            })
            .collect())
    }
}
