//! CreateQuizHandler - generates questions and persists the quiz.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::owned_workspace;
use crate::application::quiz::QuizGenerator;
use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::quiz::{Question, QuestionKind, Quiz};
use crate::ports::{QuizStore, WorkspaceStore};

use super::QuizError;

const MAX_QUESTIONS: usize = 20;

#[derive(Debug, Clone)]
pub struct CreateQuizCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub topic: String,
    pub count: usize,
    pub kinds: Vec<QuestionKind>,
    /// Another user this quiz is assigned to, when set.
    pub created_for: Option<UserId>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CreateQuizResult {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

pub struct CreateQuizHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    quizzes: Arc<dyn QuizStore>,
    generator: Arc<QuizGenerator>,
}

impl CreateQuizHandler {
    pub fn new(
        workspaces: Arc<dyn WorkspaceStore>,
        quizzes: Arc<dyn QuizStore>,
        generator: Arc<QuizGenerator>,
    ) -> Self {
        Self {
            workspaces,
            quizzes,
            generator,
        }
    }

    pub async fn handle(&self, cmd: CreateQuizCommand) -> Result<CreateQuizResult, QuizError> {
        let topic = cmd.topic.trim();
        if topic.is_empty() {
            return Err(QuizError::Validation("topic must not be empty".into()));
        }
        if cmd.count == 0 || cmd.count > MAX_QUESTIONS {
            return Err(QuizError::Validation(format!(
                "question count must be between 1 and {MAX_QUESTIONS}"
            )));
        }
        owned_workspace(&*self.workspaces, cmd.workspace_id, cmd.user_id).await?;

        // Questions already generated for the target user must not repeat.
        let target = cmd.created_for.unwrap_or(cmd.user_id);
        let avoid = self.quizzes.question_texts_for_user(target).await?;
        let generated = self
            .generator
            .generate(topic, cmd.count, &cmd.kinds, &avoid)
            .await?;

        let title = format!("Quiz: {topic}");
        let quiz = self
            .quizzes
            .insert_quiz(
                &title,
                cmd.user_id,
                cmd.workspace_id,
                &generated,
                cmd.created_for,
            )
            .await?;
        let questions = self.quizzes.questions(quiz.id).await?;
        info!(quiz_id = %quiz.id, questions = questions.len(), "quiz created");

        Ok(CreateQuizResult { quiz, questions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::adapters::memory::{InMemoryQuizStore, InMemoryWorkspaceStore};
    use crate::domain::quiz::GeneratedQuestion;
    use crate::ports::{CompletionRequest, LanguageModel, ModelError};

    struct RecordingModel {
        response: String,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingModel {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
            self.requests.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn prior_questions_for_the_user_are_not_repeated() {
        let workspaces = Arc::new(InMemoryWorkspaceStore::new());
        let quizzes = Arc::new(InMemoryQuizStore::new());
        let user_id = UserId::new(1);
        let workspace = workspaces.insert("w", user_id).await.unwrap();
        quizzes
            .insert_quiz(
                "earlier",
                user_id,
                workspace.id,
                &[GeneratedQuestion {
                    kind: QuestionKind::Open,
                    text: "What owns a value?".to_string(),
                    options: None,
                    answer: Some("Its binding.".to_string()),
                }],
                None,
            )
            .await
            .unwrap();

        let model = RecordingModel::new(
            r#"{"text": "What borrows a value?", "options": null, "answer": "A reference."}"#,
        );
        let handler = CreateQuizHandler::new(
            workspaces,
            quizzes,
            Arc::new(QuizGenerator::new(model.clone())),
        );

        let result = handler
            .handle(CreateQuizCommand {
                workspace_id: workspace.id,
                user_id,
                topic: "ownership".to_string(),
                count: 1,
                kinds: vec![QuestionKind::Open],
                created_for: None,
            })
            .await
            .unwrap();

        assert_eq!(result.questions.len(), 1);
        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let prompt = requests[0]
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(prompt.contains("What owns a value?"));
    }
}
