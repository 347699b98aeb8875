//! GetQuizHandler - a quiz with its questions in order.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, QuizId, UserId};
use crate::domain::quiz::{Question, Quiz};
use crate::ports::{QuizStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct GetQuizQuery {
    pub quiz_id: QuizId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GetQuizResult {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

pub struct GetQuizHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    quizzes: Arc<dyn QuizStore>,
}

impl GetQuizHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, quizzes: Arc<dyn QuizStore>) -> Self {
        Self {
            workspaces,
            quizzes,
        }
    }

    pub async fn handle(&self, query: GetQuizQuery) -> Result<GetQuizResult, DomainError> {
        let Some(quiz) = self.quizzes.find_quiz(query.quiz_id).await? else {
            return Err(DomainError::not_found("quiz", query.quiz_id));
        };
        owned_workspace(&*self.workspaces, quiz.workspace_id, query.user_id).await?;
        let questions = self.quizzes.questions(quiz.id).await?;
        Ok(GetQuizResult { quiz, questions })
    }
}
