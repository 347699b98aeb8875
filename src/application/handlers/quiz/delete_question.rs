//! DeleteQuestionHandler.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, QuestionId, UserId};
use crate::ports::{QuizStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct DeleteQuestionCommand {
    pub question_id: QuestionId,
    pub user_id: UserId,
}

pub struct DeleteQuestionHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    quizzes: Arc<dyn QuizStore>,
}

impl DeleteQuestionHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, quizzes: Arc<dyn QuizStore>) -> Self {
        Self {
            workspaces,
            quizzes,
        }
    }

    pub async fn handle(&self, cmd: DeleteQuestionCommand) -> Result<(), DomainError> {
        let Some(question) = self.quizzes.find_question(cmd.question_id).await? else {
            return Err(DomainError::not_found("question", cmd.question_id));
        };
        let Some(quiz) = self.quizzes.find_quiz(question.quiz_id).await? else {
            return Err(DomainError::not_found("quiz", question.quiz_id));
        };
        owned_workspace(&*self.workspaces, quiz.workspace_id, cmd.user_id).await?;
        self.quizzes.delete_question(cmd.question_id).await
    }
}
