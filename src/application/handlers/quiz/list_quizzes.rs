//! ListQuizzesHandler.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::domain::quiz::Quiz;
use crate::ports::{QuizStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct ListQuizzesQuery {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

pub struct ListQuizzesHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    quizzes: Arc<dyn QuizStore>,
}

impl ListQuizzesHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, quizzes: Arc<dyn QuizStore>) -> Self {
        Self {
            workspaces,
            quizzes,
        }
    }

    pub async fn handle(&self, query: ListQuizzesQuery) -> Result<Vec<Quiz>, DomainError> {
        owned_workspace(&*self.workspaces, query.workspace_id, query.user_id).await?;
        self.quizzes.list_for_workspace(query.workspace_id).await
    }
}
