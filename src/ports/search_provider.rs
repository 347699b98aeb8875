//! Web Search Port - external search returning short text snippets.

use async_trait::async_trait;

/// Port for web-search providers.
///
/// A non-2xx response from the provider is not an `Err`: implementations
/// degrade it to a single-element snippet list describing the failure, so a
/// flaky search never aborts an agent turn. `Err` is reserved for transport
/// failures where no response was received at all.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Network(String),

    #[error("search response could not be parsed: {0}")]
    Parse(String),
}
