//! GetHistoryHandler - chat history in a workspace, oldest first.

use std::sync::Arc;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::{ChatStore, WorkspaceStore};

use crate::application::handlers::owned_workspace;

#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    /// Whose messages to read; the caller's own when unset. Only the
    /// workspace owner gets here, so reading another user's thread in it
    /// is allowed.
    pub subject: Option<UserId>,
}

pub struct GetHistoryHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    chats: Arc<dyn ChatStore>,
}

impl GetHistoryHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, chats: Arc<dyn ChatStore>) -> Self {
        Self { workspaces, chats }
    }

    pub async fn handle(&self, query: GetHistoryQuery) -> Result<Vec<ChatMessage>, DomainError> {
        owned_workspace(&*self.workspaces, query.workspace_id, query.user_id).await?;
        let subject = query.subject.unwrap_or(query.user_id);
        self.chats.history(query.workspace_id, subject).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryChatStore, InMemoryWorkspaceStore};
    use crate::domain::chat::ChatRole;

    async fn fixture() -> (GetHistoryHandler, WorkspaceId) {
        let workspaces = Arc::new(InMemoryWorkspaceStore::new());
        let chats = Arc::new(InMemoryChatStore::new());
        let owner = UserId::new(1);
        let workspace = workspaces.insert("w", owner).await.unwrap();
        chats
            .insert(workspace.id, owner, ChatRole::User, "mine")
            .await
            .unwrap();
        chats
            .insert(workspace.id, UserId::new(2), ChatRole::User, "theirs")
            .await
            .unwrap();
        (GetHistoryHandler::new(workspaces, chats), workspace.id)
    }

    #[tokio::test]
    async fn defaults_to_the_callers_own_messages() {
        let (handler, workspace_id) = fixture().await;
        let messages = handler
            .handle(GetHistoryQuery {
                workspace_id,
                user_id: UserId::new(1),
                subject: None,
            })
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "mine");
    }

    #[tokio::test]
    async fn owner_can_read_another_users_thread() {
        let (handler, workspace_id) = fixture().await;
        let messages = handler
            .handle(GetHistoryQuery {
                workspace_id,
                user_id: UserId::new(1),
                subject: Some(UserId::new(2)),
            })
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "theirs");
    }
}
