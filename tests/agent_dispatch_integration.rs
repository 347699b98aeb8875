//! End-to-end dispatch tests: one user query through routing, agent
//! decision and tool execution, against in-memory ports and a scripted
//! model.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use agent_learn::adapters::memory::{
    InMemoryChatStore, InMemoryDocumentIndex, InMemoryDocumentStore, InMemoryFileStorage,
    InMemoryImageGenerator, InMemoryMindmapStore, InMemoryQuizStore, InMemorySearchProvider,
    InMemoryWorkspaceStore,
};
use agent_learn::application::agent::AgentEngine;
use agent_learn::application::handlers::chat::{SendMessageCommand, SendMessageHandler};
use agent_learn::domain::chat::ChatRole;
use agent_learn::domain::foundation::UserId;
use agent_learn::ports::{
    ChatStore, CompletionRequest, LanguageModel, MindmapStore, ModelError, WorkspaceStore,
};

/// Model double returning scripted responses in call order.
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

struct Fixture {
    engine: Arc<AgentEngine>,
    chats: Arc<InMemoryChatStore>,
    mindmaps: Arc<InMemoryMindmapStore>,
    workspaces: Arc<InMemoryWorkspaceStore>,
}

fn fixture(model: Arc<dyn LanguageModel>, snippets: Vec<&str>) -> Fixture {
    let chats = Arc::new(InMemoryChatStore::new());
    let mindmaps = Arc::new(InMemoryMindmapStore::new());
    let workspaces = Arc::new(InMemoryWorkspaceStore::new());
    let engine = Arc::new(AgentEngine::new(
        model,
        Arc::new(InMemoryDocumentIndex::new()),
        Arc::new(InMemorySearchProvider::with_snippets(snippets)),
        Arc::new(InMemoryImageGenerator),
        Arc::new(InMemoryFileStorage::new()),
        chats.clone(),
        Arc::new(InMemoryQuizStore::new()),
        mindmaps.clone(),
        Arc::new(InMemoryDocumentStore::new()),
    ));
    Fixture {
        engine,
        chats,
        mindmaps,
        workspaces,
    }
}

#[tokio::test]
async fn math_query_runs_through_the_chat_agent() {
    let model = ScriptedModel::new(vec![
        r#"{"destination": "chat_agent", "next_inputs": {"input": "what is 2+2"}}"#,
        r#"{"tool": "Math solving", "tool_input": "what is 2+2"}"#,
        "2 + 2 = 4",
    ]);
    let f = fixture(model, vec![]);
    let workspace = f.workspaces.insert("algebra", UserId::new(1)).await.unwrap();

    let answer = f
        .engine
        .run(workspace.id, UserId::new(1), "what is 2+2")
        .await;
    assert_eq!(answer, "2 + 2 = 4");
}

#[tokio::test]
async fn send_message_persists_both_turns() {
    let model = ScriptedModel::new(vec![
        r#"{"destination": "chat_agent", "next_inputs": {"input": "what is 2+2"}}"#,
        r#"{"tool": "Math solving", "tool_input": "what is 2+2"}"#,
        "2 + 2 = 4",
    ]);
    let f = fixture(model, vec![]);
    let user_id = UserId::new(1);
    let workspace = f.workspaces.insert("algebra", user_id).await.unwrap();

    let handler = SendMessageHandler::new(f.workspaces.clone(), f.chats.clone(), f.engine.clone());
    let result = handler
        .handle(SendMessageCommand {
            workspace_id: workspace.id,
            user_id,
            content: "what is 2+2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.user_message.role, ChatRole::User);
    assert_eq!(result.assistant_message.role, ChatRole::Assistant);
    assert_eq!(result.assistant_message.content, "2 + 2 = 4");

    let history = f.chats.history(workspace.id, user_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "what is 2+2");
}

#[tokio::test]
async fn routing_failure_becomes_error_text() {
    let model = ScriptedModel::new(vec!["I cannot decide"]);
    let f = fixture(model, vec![]);
    let workspace = f.workspaces.insert("w", UserId::new(1)).await.unwrap();

    let answer = f.engine.run(workspace.id, UserId::new(1), "hello").await;
    assert!(answer.starts_with("could not route the request"));
}

#[tokio::test]
async fn web_query_consolidates_multiple_snippets() {
    // route, decision, then one summarize call over the two snippets
    let model = ScriptedModel::new(vec![
        r#"{"destination": "google_agent", "next_inputs": {"input": "rust 2026 releases"}}"#,
        r#"{"tool": "Google search", "tool_input": "rust 2026 releases"}"#,
        "a consolidated answer",
    ]);
    let f = fixture(model, vec!["release one", "release two"]);
    let workspace = f.workspaces.insert("w", UserId::new(1)).await.unwrap();

    let answer = f
        .engine
        .run(workspace.id, UserId::new(1), "rust 2026 releases")
        .await;
    assert_eq!(answer, "a consolidated answer");
}

#[tokio::test]
async fn mindmap_query_saves_the_generated_tree() {
    // route, decision, then one expansion call (chat mindmaps stay shallow)
    let model = ScriptedModel::new(vec![
        r#"{"destination": "mindmap_agent", "next_inputs": {"input": "Rust"}}"#,
        r#"{"tool": "Mindmap generation", "tool_input": "Rust"}"#,
        r#"[{"label": "Ownership"}, {"label": "Traits"}]"#,
    ]);
    let f = fixture(model, vec![]);
    let user_id = UserId::new(7);
    let workspace = f.workspaces.insert("rust", user_id).await.unwrap();

    let answer = f.engine.run(workspace.id, user_id, "Rust").await;
    assert!(answer.contains("Ownership"));

    let trees = f.mindmaps.list_for_workspace(workspace.id).await.unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].name, "Rust");

    let nodes = f.mindmaps.nodes(trees[0].id).await.unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes.iter().filter(|n| n.parent_id.is_none()).count(), 1);
}

#[tokio::test]
async fn unknown_tool_choice_is_contained_in_the_reply() {
    // The doc agent has no document-search tool when nothing is indexed.
    let model = ScriptedModel::new(vec![
        r#"{"destination": "doc_agent", "next_inputs": {"input": "find my notes"}}"#,
        r#"{"tool": "Document search", "tool_input": "find my notes"}"#,
    ]);
    let f = fixture(model, vec![]);
    let workspace = f.workspaces.insert("w", UserId::new(1)).await.unwrap();

    let answer = f
        .engine
        .run(workspace.id, UserId::new(1), "find my notes")
        .await;
    assert_eq!(answer, "unknown tool: Document search");
}
