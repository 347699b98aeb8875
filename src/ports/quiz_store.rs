//! Quiz Store Port - quizzes, their questions, and submitted results.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QuestionId, QuizId, UserId, WorkspaceId};
use crate::domain::quiz::{GeneratedQuestion, Question, Quiz, QuizResult};

/// One answer in a quiz submission.
#[derive(Debug, Clone)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub given_answer: String,
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Create the quiz and its questions in one transaction. Question order
    /// follows the slice order via `order_index`.
    async fn insert_quiz(
        &self,
        title: &str,
        user_id: UserId,
        workspace_id: WorkspaceId,
        questions: &[GeneratedQuestion],
        created_for: Option<UserId>,
    ) -> Result<Quiz, DomainError>;

    async fn find_quiz(&self, id: QuizId) -> Result<Option<Quiz>, DomainError>;

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Quiz>, DomainError>;

    async fn delete_quiz(&self, id: QuizId) -> Result<(), DomainError>;

    /// Questions for the quiz ordered by `order_index`.
    async fn questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, DomainError>;

    /// Every question in the workspace's quizzes, grouped by quiz in
    /// `order_index` order.
    async fn questions_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Question>, DomainError>;

    /// Texts of all questions previously generated for the user, across
    /// workspaces. Fed back into generation so the user never sees a repeat.
    async fn question_texts_for_user(&self, user_id: UserId) -> Result<Vec<String>, DomainError>;

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError>;

    /// Append one question to an existing quiz, after its current last
    /// `order_index`.
    async fn insert_question(
        &self,
        quiz_id: QuizId,
        question: &GeneratedQuestion,
        created_for: UserId,
    ) -> Result<Question, DomainError>;

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError>;

    /// Grade and persist a submission, returning one result row per answer.
    /// Previous results by the same user for the quiz are replaced.
    async fn record_results(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
        answers: &[AnswerSubmission],
    ) -> Result<Vec<QuizResult>, DomainError>;

    async fn results_for_user(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> Result<Vec<QuizResult>, DomainError>;
}
