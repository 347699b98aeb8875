//! GetResultsHandler - raw per-question results for one attempt.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, QuizId, UserId};
use crate::domain::quiz::QuizResult;
use crate::ports::QuizStore;

#[derive(Debug, Clone)]
pub struct GetResultsQuery {
    pub quiz_id: QuizId,
    pub user_id: UserId,
}

pub struct GetResultsHandler {
    quizzes: Arc<dyn QuizStore>,
}

impl GetResultsHandler {
    pub fn new(quizzes: Arc<dyn QuizStore>) -> Self {
        Self { quizzes }
    }

    pub async fn handle(&self, query: GetResultsQuery) -> Result<Vec<QuizResult>, DomainError> {
        if self.quizzes.find_quiz(query.quiz_id).await?.is_none() {
            return Err(DomainError::not_found("Quiz", query.quiz_id));
        }
        self.quizzes
            .results_for_user(query.quiz_id, query.user_id)
            .await
    }
}
