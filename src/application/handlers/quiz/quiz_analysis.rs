//! QuizAnalysisHandler - accuracy plus model-written feedback.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{DomainError, QuizId, UserId};
use crate::domain::quiz::QuizAnalysis;
use crate::ports::{CompletionRequest, LanguageModel, ModelRole, QuizStore};

#[derive(Debug, Clone)]
pub struct QuizAnalysisQuery {
    pub quiz_id: QuizId,
    pub user_id: UserId,
}

pub struct QuizAnalysisHandler {
    quizzes: Arc<dyn QuizStore>,
    model: Arc<dyn LanguageModel>,
}

impl QuizAnalysisHandler {
    pub fn new(quizzes: Arc<dyn QuizStore>, model: Arc<dyn LanguageModel>) -> Self {
        Self { quizzes, model }
    }

    pub async fn handle(&self, query: QuizAnalysisQuery) -> Result<QuizAnalysis, DomainError> {
        let results = self
            .quizzes
            .results_for_user(query.quiz_id, query.user_id)
            .await?;
        if results.is_empty() {
            return Err(DomainError::not_found("quiz results for quiz", query.quiz_id));
        }

        let mut analysis = QuizAnalysis::from_results(query.quiz_id, query.user_id, &results);

        // Feedback is decoration; a model failure leaves it empty.
        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                "You are an encouraging tutor. In two or three sentences, give \
                 feedback on a quiz result and suggest what to practice next.",
            )
            .with_message(
                ModelRole::User,
                format!(
                    "The student answered {} of {} questions correctly ({}%).",
                    analysis.correct_answers, analysis.total_questions, analysis.accuracy
                ),
            );
        match self.model.complete(request).await {
            Ok(feedback) => analysis.feedback = feedback,
            Err(err) => warn!(quiz_id = %query.quiz_id, error = %err, "feedback generation failed"),
        }

        Ok(analysis)
    }
}
