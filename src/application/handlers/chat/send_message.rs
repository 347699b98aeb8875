//! SendMessageHandler - one chat turn through the agent engine.

use std::sync::Arc;

use crate::application::agent::AgentEngine;
use crate::application::handlers::owned_workspace;
use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::{ChatStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

pub struct SendMessageHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    chats: Arc<dyn ChatStore>,
    engine: Arc<AgentEngine>,
}

impl SendMessageHandler {
    pub fn new(
        workspaces: Arc<dyn WorkspaceStore>,
        chats: Arc<dyn ChatStore>,
        engine: Arc<AgentEngine>,
    ) -> Self {
        Self {
            workspaces,
            chats,
            engine,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, DomainError> {
        let content = cmd.content.trim();
        if content.is_empty() {
            return Err(DomainError::validation("message must not be empty"));
        }
        owned_workspace(&*self.workspaces, cmd.workspace_id, cmd.user_id).await?;

        // The engine runs against history as it was before this message; the
        // query itself is passed separately, so it is not replayed twice.
        let answer = self
            .engine
            .run(cmd.workspace_id, cmd.user_id, content)
            .await;

        let user_message = self
            .chats
            .insert(cmd.workspace_id, cmd.user_id, ChatRole::User, content)
            .await?;
        let assistant_message = self
            .chats
            .insert(cmd.workspace_id, cmd.user_id, ChatRole::Assistant, &answer)
            .await?;

        Ok(SendMessageResult {
            user_message,
            assistant_message,
        })
    }
}
