//! Tool abstraction - one named external action an agent may take per turn.

use async_trait::async_trait;

/// What a tool invocation produced.
///
/// `Snippets` carries an ordered list of short texts (search hits, retrieved
/// chunks); the agent consolidates those into one string before answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    Text(String),
    Snippets(Vec<String>),
}

impl ToolOutput {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Failure inside a tool. Never escapes the agent turn; the agent folds it
/// into its output text.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ToolError(pub String);

impl ToolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A named callable an agent can decide to invoke, at most once per turn.
///
/// `name` must be unique within the owning agent's tool set; `description`
/// is shown to the model when it decides whether the tool applies.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError>;
}
