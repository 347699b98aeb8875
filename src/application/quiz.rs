//! Quiz generation - model-backed question authoring.

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::debug;

use crate::domain::agent::strip_code_fences;
use crate::domain::quiz::{GeneratedQuestion, QuestionKind};
use crate::ports::{CompletionRequest, LanguageModel, ModelError, ModelRole};

#[derive(Debug, thiserror::Error)]
pub enum QuizGenError {
    #[error("model call failed: {0}")]
    Model(#[from] ModelError),

    #[error("model returned a malformed question: {0}")]
    Malformed(String),

    #[error("model returned no questions")]
    Empty,
}

/// One question as the model returns it; the kind is fixed by the prompt.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    answer: Option<String>,
}

pub struct QuizGenerator {
    model: Arc<dyn LanguageModel>,
}

impl QuizGenerator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Generates `count` questions about `topic`, one model call per
    /// question with a randomly drawn kind (from `kinds`, or all kinds when
    /// empty). Texts in `avoid` - and each question generated along the
    /// way - are fed back into the prompt so the user never sees a repeat.
    pub async fn generate(
        &self,
        topic: &str,
        count: usize,
        kinds: &[QuestionKind],
        avoid: &[String],
    ) -> Result<Vec<GeneratedQuestion>, QuizGenError> {
        let kinds = if kinds.is_empty() {
            &QuestionKind::ALL[..]
        } else {
            kinds
        };

        let mut taken: Vec<String> = avoid.to_vec();
        let mut questions = Vec::with_capacity(count);
        for _ in 0..count {
            let kind = kinds
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(QuestionKind::Open);
            let question = self.generate_one(topic, kind, &taken).await?;
            taken.push(question.text.clone());
            questions.push(question);
        }

        if questions.is_empty() {
            return Err(QuizGenError::Empty);
        }
        debug!(topic, generated = questions.len(), "quiz questions generated");
        Ok(questions)
    }

    async fn generate_one(
        &self,
        topic: &str,
        kind: QuestionKind,
        taken: &[String],
    ) -> Result<GeneratedQuestion, QuizGenError> {
        let mut prompt = format!("Write one {} question about: {topic}", kind.prompt_label());
        if !taken.is_empty() {
            prompt.push_str("\n\nDo not repeat any of these existing questions:");
            for text in taken {
                prompt.push_str("\n- ");
                prompt.push_str(text);
            }
        }

        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                format!(
                    "You write quiz questions for students. Respond with one \
                     JSON object {{\"text\": \"<question>\", \"options\": \
                     [\"<choice>\", ...] or null, \"answer\": \"<correct \
                     answer>\"}}. Only a {} question gets options.",
                    QuestionKind::Mcq.prompt_label()
                ),
            )
            .with_message(ModelRole::User, prompt)
            .with_json_response();

        let raw = self.model.complete(request).await?;
        let parsed: RawQuestion = serde_json::from_str(strip_code_fences(&raw))
            .map_err(|e| QuizGenError::Malformed(e.to_string()))?;

        Ok(GeneratedQuestion {
            kind,
            text: parsed.text,
            options: parsed.options,
            answer: parsed.answer,
        })
    }
}
