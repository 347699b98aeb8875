//! Quiz handlers: generation, retrieval, submission and analysis.

pub mod add_question;
pub mod check_answer;
pub mod create_quiz;
pub mod delete_question;
pub mod delete_quiz;
pub mod get_quiz;
pub mod get_results;
pub mod list_questions;
pub mod list_quizzes;
pub mod quiz_analysis;
pub mod submit_quiz;

pub use add_question::{AddQuestionCommand, AddQuestionHandler};
pub use check_answer::{CheckAnswerCommand, CheckAnswerHandler};
pub use create_quiz::{CreateQuizCommand, CreateQuizHandler, CreateQuizResult};
pub use delete_question::{DeleteQuestionCommand, DeleteQuestionHandler};
pub use delete_quiz::{DeleteQuizCommand, DeleteQuizHandler};
pub use get_quiz::{GetQuizHandler, GetQuizQuery, GetQuizResult};
pub use get_results::{GetResultsHandler, GetResultsQuery};
pub use list_questions::{ListQuestionsHandler, ListQuestionsQuery};
pub use list_quizzes::{ListQuizzesHandler, ListQuizzesQuery};
pub use quiz_analysis::{QuizAnalysisHandler, QuizAnalysisQuery};
pub use submit_quiz::{SubmitQuizCommand, SubmitQuizHandler, SubmitQuizResult};

use crate::application::quiz::QuizGenError;
use crate::domain::foundation::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("quiz generation failed: {0}")]
    Generation(#[from] QuizGenError),

    #[error(transparent)]
    Store(#[from] DomainError),
}
