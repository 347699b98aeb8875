//! ListQuestionsHandler - every question in a workspace's quizzes.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::domain::quiz::Question;
use crate::ports::{QuizStore, WorkspaceStore};

use crate::application::handlers::owned_workspace;

#[derive(Debug, Clone)]
pub struct ListQuestionsQuery {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

pub struct ListQuestionsHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    quizzes: Arc<dyn QuizStore>,
}

impl ListQuestionsHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, quizzes: Arc<dyn QuizStore>) -> Self {
        Self {
            workspaces,
            quizzes,
        }
    }

    pub async fn handle(&self, query: ListQuestionsQuery) -> Result<Vec<Question>, DomainError> {
        owned_workspace(&*self.workspaces, query.workspace_id, query.user_id).await?;
        self.quizzes.questions_for_workspace(query.workspace_id).await
    }
}
