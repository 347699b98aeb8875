//! SubmitQuizHandler - grades a submission and stores the results.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, QuizId, UserId};
use crate::domain::quiz::{QuizAnalysis, QuizResult};
use crate::ports::{AnswerSubmission, QuizStore};

#[derive(Debug, Clone)]
pub struct SubmitQuizCommand {
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SubmitQuizResult {
    pub results: Vec<QuizResult>,
    pub analysis: QuizAnalysis,
}

pub struct SubmitQuizHandler {
    quizzes: Arc<dyn QuizStore>,
}

impl SubmitQuizHandler {
    pub fn new(quizzes: Arc<dyn QuizStore>) -> Self {
        Self { quizzes }
    }

    pub async fn handle(&self, cmd: SubmitQuizCommand) -> Result<SubmitQuizResult, DomainError> {
        if cmd.answers.is_empty() {
            return Err(DomainError::validation("submission contains no answers"));
        }
        if self.quizzes.find_quiz(cmd.quiz_id).await?.is_none() {
            return Err(DomainError::not_found("quiz", cmd.quiz_id));
        }

        let results = self
            .quizzes
            .record_results(cmd.quiz_id, cmd.user_id, &cmd.answers)
            .await?;
        let analysis = QuizAnalysis::from_results(cmd.quiz_id, cmd.user_id, &results);
        info!(
            quiz_id = %cmd.quiz_id,
            user_id = %cmd.user_id,
            accuracy = analysis.accuracy,
            "quiz submitted"
        );
        Ok(SubmitQuizResult { results, analysis })
    }
}
