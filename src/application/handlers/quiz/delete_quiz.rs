//! DeleteQuizHandler.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, QuizId, UserId};
use crate::ports::{QuizStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct DeleteQuizCommand {
    pub quiz_id: QuizId,
    pub user_id: UserId,
}

pub struct DeleteQuizHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    quizzes: Arc<dyn QuizStore>,
}

impl DeleteQuizHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, quizzes: Arc<dyn QuizStore>) -> Self {
        Self {
            workspaces,
            quizzes,
        }
    }

    pub async fn handle(&self, cmd: DeleteQuizCommand) -> Result<(), DomainError> {
        let Some(quiz) = self.quizzes.find_quiz(cmd.quiz_id).await? else {
            return Err(DomainError::not_found("quiz", cmd.quiz_id));
        };
        owned_workspace(&*self.workspaces, quiz.workspace_id, cmd.user_id).await?;
        self.quizzes.delete_quiz(cmd.quiz_id).await
    }
}
