//! Router - one model call classifying a query to a destination agent.

use std::sync::Arc;

use crate::domain::agent::{parse_route_decision, AgentName, RouteDecision, RouteParseError};
use crate::domain::chat::ChatTurn;
use crate::ports::{CompletionRequest, LanguageModel, ModelError, ModelRole};

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("router model call failed: {0}")]
    Model(#[from] ModelError),

    #[error(transparent)]
    Parse(#[from] RouteParseError),
}

pub struct Router {
    model: Arc<dyn LanguageModel>,
}

impl Router {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Classifies the query into exactly one destination. The router has no
    /// tools and makes exactly one model call.
    pub async fn route(
        &self,
        query: &str,
        history: &[ChatTurn],
    ) -> Result<RouteDecision, RouterError> {
        let mut request = CompletionRequest::new()
            .with_message(ModelRole::System, Self::routing_prompt())
            .with_json_response()
            .with_temperature(0.0);
        for turn in history {
            let role = match turn.role {
                crate::domain::chat::ChatRole::User => ModelRole::User,
                crate::domain::chat::ChatRole::Assistant => ModelRole::Assistant,
            };
            request = request.with_message(role, turn.text.clone());
        }
        request = request.with_message(ModelRole::User, query);

        let raw = self.model.complete(request).await?;
        Ok(parse_route_decision(&raw)?)
    }

    fn routing_prompt() -> String {
        let mut prompt = String::from(
            "You are a router for a learning assistant. Read the user's message \
             and choose the single destination best suited to handle it:\n",
        );
        for name in AgentName::ALL {
            let line = match name {
                AgentName::QuizAgent => {
                    "- quiz_agent: creating quizzes or practice questions\n"
                }
                AgentName::DocAgent => {
                    "- doc_agent: questions about uploaded documents, or creating \
                     documents and images\n"
                }
                AgentName::MindmapAgent => "- mindmap_agent: building mindmaps of a topic\n",
                AgentName::GoogleAgent => {
                    "- google_agent: questions needing current information from the web\n"
                }
                AgentName::LlmAgent => {
                    "- chat_agent: general conversation and everything else\n"
                }
            };
            prompt.push_str(line);
        }
        prompt.push_str(
            "\nRespond with a JSON object of the form {\"destination\": \"<name>\", \
             \"next_inputs\": {\"input\": \"<the message to forward>\"}}.",
        );
        prompt
    }
}
