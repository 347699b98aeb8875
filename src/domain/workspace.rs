//! Workspaces group a user's documents, chats, quizzes and mindmaps.

use serde::{Deserialize, Serialize};

use super::foundation::{UserId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub user_id: UserId,
}
