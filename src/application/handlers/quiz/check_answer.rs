//! CheckAnswerHandler - model-backed verification of a free-form answer.
//!
//! Used for open-ended questions where string comparison cannot grade; the
//! model is asked for a strict yes/no verdict.

use std::sync::Arc;

use tracing::debug;

use crate::ports::{CompletionRequest, LanguageModel, ModelRole};

use super::QuizError;

#[derive(Debug, Clone)]
pub struct CheckAnswerCommand {
    pub question: String,
    pub given_answer: String,
}

pub struct CheckAnswerHandler {
    model: Arc<dyn LanguageModel>,
}

impl CheckAnswerHandler {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn handle(&self, cmd: CheckAnswerCommand) -> Result<bool, QuizError> {
        let question = cmd.question.trim();
        let answer = cmd.given_answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(QuizError::Validation(
                "question and answer must not be empty".into(),
            ));
        }

        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                "You grade quiz answers. Reply with exactly one word: \
                 \"yes\" if the answer is correct, \"no\" otherwise.",
            )
            .with_message(
                ModelRole::User,
                format!("Question: {question}\nAnswer: {answer}"),
            )
            .with_temperature(0.0);

        let verdict = self
            .model
            .complete(request)
            .await
            .map_err(crate::application::quiz::QuizGenError::Model)?;
        let correct = verdict.trim().to_lowercase().starts_with("yes");
        debug!(correct, "answer checked");
        Ok(correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ModelError;
    use async_trait::async_trait;

    struct FixedModel(&'static str);

    #[async_trait]
    impl LanguageModel for FixedModel {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn yes_verdict_is_correct() {
        let handler = CheckAnswerHandler::new(Arc::new(FixedModel("Yes.")));
        let correct = handler
            .handle(CheckAnswerCommand {
                question: "What is 2+2?".into(),
                given_answer: "four".into(),
            })
            .await
            .unwrap();
        assert!(correct);
    }

    #[tokio::test]
    async fn anything_else_is_incorrect() {
        let handler = CheckAnswerHandler::new(Arc::new(FixedModel("no, that is wrong")));
        let correct = handler
            .handle(CheckAnswerCommand {
                question: "What is 2+2?".into(),
                given_answer: "five".into(),
            })
            .await
            .unwrap();
        assert!(!correct);
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let handler = CheckAnswerHandler::new(Arc::new(FixedModel("yes")));
        let err = handler
            .handle(CheckAnswerCommand {
                question: "  ".into(),
                given_answer: "four".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Validation(_)));
    }
}
