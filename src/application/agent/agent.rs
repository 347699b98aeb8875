//! Agent - a single-decision, tool-using responder to one query.
//!
//! State machine with two states: START and DECIDED. One model call decides
//! between answering directly and invoking exactly one registered tool; a
//! second call happens only to consolidate a multi-snippet tool result. No
//! retries, no loops back to decide again.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::agent::{parse_tool_decision, AgentName, DecisionParseError, ToolChoice};
use crate::domain::chat::ChatTurn;
use crate::ports::{CompletionRequest, LanguageModel, ModelError, ModelRole};

use super::tool::{Tool, ToolOutput};

/// Failures that escape an agent turn. Tool failures and unknown tool names
/// do not appear here; those are contained and reported in the output text.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("model call failed: {0}")]
    Model(#[from] ModelError),

    #[error(transparent)]
    Decision(#[from] DecisionParseError),
}

pub struct Agent {
    name: AgentName,
    instructions: String,
    tools: Vec<Arc<dyn Tool>>,
    model: Arc<dyn LanguageModel>,
}

impl Agent {
    pub fn new(
        name: AgentName,
        instructions: impl Into<String>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            name,
            instructions: instructions.into(),
            tools: Vec::new(),
            model,
        }
    }

    /// Registers a tool. The tool set is fixed once the agent is built;
    /// nothing mutates it afterwards.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn name(&self) -> AgentName {
        self.name
    }

    /// Runs one agent turn: decide, optionally invoke one tool, answer.
    pub async fn run(&self, query: &str, history: &[ChatTurn]) -> Result<String, AgentError> {
        let mut request = CompletionRequest::new()
            .with_message(ModelRole::System, self.decision_prompt())
            .with_json_response();
        for turn in history {
            let role = match turn.role {
                crate::domain::chat::ChatRole::User => ModelRole::User,
                crate::domain::chat::ChatRole::Assistant => ModelRole::Assistant,
            };
            request = request.with_message(role, turn.text.clone());
        }
        request = request.with_message(ModelRole::User, query);

        let raw = self.model.complete(request).await?;
        let decision = parse_tool_decision(&raw)?;

        let tool_name = match decision.choice {
            ToolChoice::Answer => return Ok(decision.tool_input),
            ToolChoice::Invoke(name) => name,
        };

        let Some(tool) = self.tools.iter().find(|t| t.name() == tool_name) else {
            warn!(agent = %self.name, tool = %tool_name, "model chose an unregistered tool");
            return Ok(format!("unknown tool: {tool_name}"));
        };

        debug!(agent = %self.name, tool = %tool_name, "invoking tool");
        let output = match tool.invoke(&decision.tool_input).await {
            Ok(output) => output,
            Err(err) => return Ok(format!("tool `{tool_name}` failed: {err}")),
        };

        match output {
            ToolOutput::Text(text) => Ok(text),
            ToolOutput::Snippets(snippets) => Ok(self.summarize(query, &snippets).await),
        }
    }

    /// Consolidates multi-snippet tool output into one answer. A failed
    /// summarize call degrades to joining the snippets; it never fails the
    /// turn.
    async fn summarize(&self, query: &str, snippets: &[String]) -> String {
        if snippets.is_empty() {
            return String::new();
        }
        if snippets.len() == 1 {
            return snippets[0].clone();
        }

        let joined = snippets.join("\n");
        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                "Combine the following snippets into one concise, coherent answer \
                 to the user's question. Answer with plain text only.",
            )
            .with_message(ModelRole::User, format!("Question: {query}\n\nSnippets:\n{joined}"));

        match self.model.complete(request).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!(agent = %self.name, error = %err, "summarize call failed, joining snippets");
                joined
            }
        }
    }

    fn decision_prompt(&self) -> String {
        let mut prompt = self.instructions.clone();
        prompt.push_str("\n\nAvailable tools:\n");
        if self.tools.is_empty() {
            prompt.push_str("(none)\n");
        }
        for tool in &self.tools {
            prompt.push_str("- ");
            prompt.push_str(tool.name());
            prompt.push_str(": ");
            prompt.push_str(tool.description());
            prompt.push('\n');
        }
        prompt.push_str(
            "\nDecide how to handle the user's message. Respond with a JSON object \
             of the form {\"tool\": \"<tool name>\", \"tool_input\": \"<argument>\"} \
             to use a tool, or {\"tool\": \"NONE\", \"tool_input\": \"<your final \
             answer>\"} to answer directly. Use at most one tool.",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::agent::tool::ToolError;

    /// Model double returning scripted responses in order.
    struct ScriptedModel {
        responses: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<&str>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().rev().map(String::from).collect()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, ModelError> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ModelError::unavailable("script exhausted"))
        }
    }

    struct FixedTool {
        name: &'static str,
        output: ToolOutput,
    }

    #[async_trait]
    impl Tool for FixedTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test tool"
        }

        async fn invoke(&self, _input: &str) -> Result<ToolOutput, ToolError> {
            Ok(self.output.clone())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "Broken"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        async fn invoke(&self, _input: &str) -> Result<ToolOutput, ToolError> {
            Err(ToolError::new("out of order"))
        }
    }

    #[tokio::test]
    async fn none_decision_returns_tool_input_verbatim() {
        let model = ScriptedModel::new(vec![r#"{"tool": "NONE", "tool_input": "the answer"}"#]);
        let agent = Agent::new(AgentName::LlmAgent, "You answer questions.", model);

        let output = agent.run("anything", &[]).await.unwrap();
        assert_eq!(output, "the answer");
    }

    #[tokio::test]
    async fn unknown_tool_name_is_contained() {
        let model = ScriptedModel::new(vec![r#"{"tool": "Ghost", "tool_input": "x"}"#]);
        let agent = Agent::new(AgentName::LlmAgent, "You answer questions.", model);

        let output = agent.run("anything", &[]).await.unwrap();
        assert_eq!(output, "unknown tool: Ghost");
    }

    #[tokio::test]
    async fn tool_failure_is_reported_in_output() {
        let model = ScriptedModel::new(vec![r#"{"tool": "Broken", "tool_input": "x"}"#]);
        let agent = Agent::new(AgentName::LlmAgent, "You answer questions.", model)
            .with_tool(Arc::new(FailingTool));

        let output = agent.run("anything", &[]).await.unwrap();
        assert_eq!(output, "tool `Broken` failed: out of order");
    }

    #[tokio::test]
    async fn single_snippet_needs_no_summary_call() {
        let model = ScriptedModel::new(vec![r#"{"tool": "Search", "tool_input": "rust"}"#]);
        let agent = Agent::new(AgentName::GoogleAgent, "You search.", model).with_tool(Arc::new(
            FixedTool {
                name: "Search",
                output: ToolOutput::Snippets(vec!["only hit".to_string()]),
            },
        ));

        let output = agent.run("rust?", &[]).await.unwrap();
        assert_eq!(output, "only hit");
    }

    #[tokio::test]
    async fn multiple_snippets_are_summarized() {
        let model = ScriptedModel::new(vec![
            r#"{"tool": "Search", "tool_input": "rust"}"#,
            "a consolidated answer",
        ]);
        let agent = Agent::new(AgentName::GoogleAgent, "You search.", model).with_tool(Arc::new(
            FixedTool {
                name: "Search",
                output: ToolOutput::Snippets(vec!["hit one".to_string(), "hit two".to_string()]),
            },
        ));

        let output = agent.run("rust?", &[]).await.unwrap();
        assert_eq!(output, "a consolidated answer");
    }

    #[tokio::test]
    async fn failed_summary_degrades_to_joined_snippets() {
        // Script only the decision; the summarize call hits an exhausted
        // script and fails.
        let model = ScriptedModel::new(vec![r#"{"tool": "Search", "tool_input": "rust"}"#]);
        let agent = Agent::new(AgentName::GoogleAgent, "You search.", model).with_tool(Arc::new(
            FixedTool {
                name: "Search",
                output: ToolOutput::Snippets(vec!["one".to_string(), "two".to_string()]),
            },
        ));

        let output = agent.run("rust?", &[]).await.unwrap();
        assert_eq!(output, "one\ntwo");
    }

    #[tokio::test]
    async fn malformed_decision_is_a_typed_error() {
        let model = ScriptedModel::new(vec!["let me think about that"]);
        let agent = Agent::new(AgentName::LlmAgent, "You answer questions.", model);

        let err = agent.run("anything", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::Decision(_)));
    }
}
