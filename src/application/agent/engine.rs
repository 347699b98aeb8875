//! Dispatch - the single entry point the chat layer calls.
//!
//! One invocation: load history, build the agent set fresh, route once, run
//! the chosen agent once. Nothing is shared across invocations except the
//! chat history in the store, so concurrent requests need no coordination
//! here. `run` never fails; every internal failure folds into an
//! error-describing string for the user.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::agent::AgentName;
use crate::domain::chat::ChatTurn;
use crate::domain::foundation::{UserId, WorkspaceId};
use crate::ports::{
    ChatStore, DocumentIndex, DocumentStore, FileStorage, ImageGenerator, LanguageModel,
    MindmapStore, QuizStore, SearchProvider,
};

use super::agent::Agent;
use super::delegation::{AgentRegistry, DelegationTool};
use super::router::Router;
use super::tool::Tool;
use super::tools::{
    DirectAnswerTool, DocumentSearchTool, ImageTool, MathTool, MindmapGenerationTool,
    QuizGenerationTool, SummaryDocTool, WebSearchTool,
};
use crate::application::mindmap::MindmapGenerator;
use crate::application::quiz::QuizGenerator;

/// How many prior messages are replayed to the router and agent.
const HISTORY_LIMIT: i64 = 20;

/// Everything the agent subsystem needs from the outside world.
pub struct AgentEngine {
    model: Arc<dyn LanguageModel>,
    index: Arc<dyn DocumentIndex>,
    search: Arc<dyn SearchProvider>,
    images: Arc<dyn ImageGenerator>,
    storage: Arc<dyn FileStorage>,
    chats: Arc<dyn ChatStore>,
    quizzes: Arc<dyn QuizStore>,
    mindmaps: Arc<dyn MindmapStore>,
    documents: Arc<dyn DocumentStore>,
}

impl AgentEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: Arc<dyn LanguageModel>,
        index: Arc<dyn DocumentIndex>,
        search: Arc<dyn SearchProvider>,
        images: Arc<dyn ImageGenerator>,
        storage: Arc<dyn FileStorage>,
        chats: Arc<dyn ChatStore>,
        quizzes: Arc<dyn QuizStore>,
        mindmaps: Arc<dyn MindmapStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            model,
            index,
            search,
            images,
            storage,
            chats,
            quizzes,
            mindmaps,
            documents,
        }
    }

    /// Handles one user query end to end and returns the final text. Never
    /// returns an error: internal failures become user-visible error text.
    pub async fn run(&self, workspace_id: WorkspaceId, user_id: UserId, query: &str) -> String {
        let history = match self.chats.recent(workspace_id, user_id, HISTORY_LIMIT).await {
            Ok(messages) => messages.iter().map(ChatTurn::from).collect::<Vec<_>>(),
            Err(err) => {
                warn!(%workspace_id, %user_id, error = %err, "chat history unavailable");
                return format!("could not load chat history: {err}");
            }
        };

        let registry = self.build_agents(workspace_id, user_id).await;

        let router = Router::new(Arc::clone(&self.model));
        let decision = match router.route(query, &history).await {
            Ok(decision) => decision,
            Err(err) => {
                warn!(%workspace_id, error = %err, "routing failed");
                return format!("could not route the request: {err}");
            }
        };
        info!(%workspace_id, destination = %decision.destination, "query routed");

        // The registry is built from the full agent set, so the destination
        // is always present; the fallback covers a future partial set.
        let Some(agent) = registry.get(decision.destination) else {
            return format!("unknown agent: {}", decision.destination);
        };

        let forwarded = decision
            .next_inputs
            .get("input")
            .and_then(|v| v.as_str())
            .unwrap_or(query);

        match agent.run(forwarded, &history).await {
            Ok(output) => output,
            Err(err) => {
                warn!(%workspace_id, agent = %decision.destination, error = %err, "agent turn failed");
                format!("the {} could not handle the request: {err}", decision.destination.title())
            }
        }
    }

    /// Builds the per-call agent set and installs it into a fresh registry.
    /// Every agent carries one delegation tool per peer.
    async fn build_agents(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Arc<AgentRegistry> {
        let registry = AgentRegistry::new();
        let quiz_generator = Arc::new(QuizGenerator::new(Arc::clone(&self.model)));
        let mindmap_generator = Arc::new(MindmapGenerator::new(Arc::clone(&self.model)));

        let mut agents: HashMap<AgentName, Arc<Agent>> = HashMap::new();
        for name in AgentName::ALL {
            let mut tools: Vec<Arc<dyn Tool>> = match name {
                AgentName::DocAgent => {
                    let mut tools: Vec<Arc<dyn Tool>> = vec![
                        Arc::new(SummaryDocTool {
                            model: Arc::clone(&self.model),
                            storage: Arc::clone(&self.storage),
                            documents: Arc::clone(&self.documents),
                            workspace_id,
                            user_id,
                        }),
                        Arc::new(ImageTool {
                            images: Arc::clone(&self.images),
                            storage: Arc::clone(&self.storage),
                            documents: Arc::clone(&self.documents),
                            workspace_id,
                            user_id,
                        }),
                    ];
                    if self.index.has_index(workspace_id).await {
                        tools.push(Arc::new(DocumentSearchTool {
                            index: Arc::clone(&self.index),
                            workspace_id,
                        }));
                    }
                    tools
                }
                AgentName::GoogleAgent => vec![Arc::new(WebSearchTool {
                    search: Arc::clone(&self.search),
                })],
                AgentName::LlmAgent => vec![
                    Arc::new(DirectAnswerTool {
                        model: Arc::clone(&self.model),
                    }),
                    Arc::new(MathTool {
                        model: Arc::clone(&self.model),
                    }),
                ],
                AgentName::QuizAgent => vec![Arc::new(QuizGenerationTool {
                    generator: Arc::clone(&quiz_generator),
                    quizzes: Arc::clone(&self.quizzes),
                    workspace_id,
                    user_id,
                })],
                AgentName::MindmapAgent => vec![Arc::new(MindmapGenerationTool {
                    generator: Arc::clone(&mindmap_generator),
                    mindmaps: Arc::clone(&self.mindmaps),
                    workspace_id,
                    user_id,
                })],
            };
            for peer in AgentName::ALL {
                if peer != name {
                    tools.push(Arc::new(DelegationTool::new(peer, Arc::clone(&registry))));
                }
            }
            let agent = Agent::new(name, Self::instructions(name), Arc::clone(&self.model))
                .with_tools(tools);
            agents.insert(name, Arc::new(agent));
        }

        registry.install(agents);
        registry
    }

    fn instructions(name: AgentName) -> &'static str {
        match name {
            AgentName::DocAgent => {
                "You help with the documents in this workspace: answering \
                 questions about them and creating new documents or images."
            }
            AgentName::GoogleAgent => {
                "You answer questions that need current information from the web."
            }
            AgentName::LlmAgent => {
                "You are a general learning assistant for conversation and \
                 problem solving."
            }
            AgentName::QuizAgent => "You create quizzes and practice questions.",
            AgentName::MindmapAgent => "You build mindmaps of topics.",
        }
    }
}
