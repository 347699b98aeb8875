//! AddQuestionHandler - appends one question to an existing quiz.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, QuizId, UserId};
use crate::domain::quiz::{GeneratedQuestion, Question};
use crate::ports::{QuizStore, WorkspaceStore};

use crate::application::handlers::owned_workspace;

#[derive(Debug, Clone)]
pub struct AddQuestionCommand {
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub question: GeneratedQuestion,
    pub created_for: Option<UserId>,
}

pub struct AddQuestionHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    quizzes: Arc<dyn QuizStore>,
}

impl AddQuestionHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, quizzes: Arc<dyn QuizStore>) -> Self {
        Self {
            workspaces,
            quizzes,
        }
    }

    pub async fn handle(&self, cmd: AddQuestionCommand) -> Result<Question, DomainError> {
        if cmd.question.text.trim().is_empty() {
            return Err(DomainError::validation("question text must not be empty"));
        }
        let Some(quiz) = self.quizzes.find_quiz(cmd.quiz_id).await? else {
            return Err(DomainError::not_found("quiz", cmd.quiz_id));
        };
        owned_workspace(&*self.workspaces, quiz.workspace_id, cmd.user_id).await?;

        let created_for = cmd.created_for.unwrap_or(cmd.user_id);
        self.quizzes
            .insert_question(cmd.quiz_id, &cmd.question, created_for)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryQuizStore, InMemoryWorkspaceStore};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::quiz::QuestionKind;

    fn question(text: &str) -> GeneratedQuestion {
        GeneratedQuestion {
            kind: QuestionKind::Open,
            text: text.to_string(),
            options: None,
            answer: Some("42".to_string()),
        }
    }

    #[tokio::test]
    async fn appends_after_the_last_order_index() {
        let workspaces = Arc::new(InMemoryWorkspaceStore::new());
        let quizzes = Arc::new(InMemoryQuizStore::new());
        let user_id = UserId::new(1);
        let workspace = workspaces.insert("w", user_id).await.unwrap();
        let quiz = quizzes
            .insert_quiz(
                "t",
                user_id,
                workspace.id,
                &[question("first"), question("second")],
                None,
            )
            .await
            .unwrap();

        let handler = AddQuestionHandler::new(workspaces, quizzes.clone());
        let added = handler
            .handle(AddQuestionCommand {
                quiz_id: quiz.id,
                user_id,
                question: question("third"),
                created_for: None,
            })
            .await
            .unwrap();

        assert_eq!(added.order_index, 2);
        assert_eq!(quizzes.questions(quiz.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_quiz_is_not_found() {
        let handler = AddQuestionHandler::new(
            Arc::new(InMemoryWorkspaceStore::new()),
            Arc::new(InMemoryQuizStore::new()),
        );
        let err = handler
            .handle(AddQuestionCommand {
                quiz_id: QuizId::new(9),
                user_id: UserId::new(1),
                question: question("q"),
                created_for: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
