//! Quizzes, questions and submitted results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::foundation::{QuestionId, QuizId, UserId, WorkspaceId};

/// The shape of a generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Mcq,
    FillBlank,
    Open,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [QuestionKind::Mcq, QuestionKind::FillBlank, QuestionKind::Open];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::FillBlank => "fill_blank",
            QuestionKind::Open => "open",
        }
    }

    /// Phrase handed to the model when asking for a question of this kind.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "multiple choice",
            QuestionKind::FillBlank => "fill in the blanks",
            QuestionKind::Open => "open ended",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq" => Ok(QuestionKind::Mcq),
            "fill_blank" => Ok(QuestionKind::FillBlank),
            "open" => Ok(QuestionKind::Open),
            other => Err(format!("unknown question kind: {}", other)),
        }
    }
}

/// A question as returned by the model, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// A quiz record owned by a user within a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A persisted quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub order_index: i32,
    pub quiz_id: QuizId,
    pub created_for: UserId,
}

/// One submitted answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: QuizId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub given_answer: Option<String>,
    pub is_correct: bool,
}

/// Aggregate outcome of one user's attempt at one quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnalysis {
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Percentage, rounded to two decimals.
    pub accuracy: f64,
    pub feedback: String,
}

impl QuizAnalysis {
    /// Computes the score fields from raw results; `feedback` is filled in
    /// by the caller from a model call.
    pub fn from_results(quiz_id: QuizId, user_id: UserId, results: &[QuizResult]) -> Self {
        let total = results.len();
        let correct = results.iter().filter(|r| r.is_correct).count();
        let accuracy = if total == 0 {
            0.0
        } else {
            (correct as f64 / total as f64 * 10_000.0).round() / 100.0
        };
        Self {
            quiz_id,
            user_id,
            total_questions: total,
            correct_answers: correct,
            accuracy,
            feedback: String::new(),
        }
    }
}

/// Grades a submitted answer against the stored correct answer. Comparison
/// is case-insensitive and ignores surrounding whitespace; a question with
/// no stored answer never grades correct.
pub fn grade_answer(correct: Option<&str>, given: &str) -> bool {
    match correct {
        Some(correct) => correct.trim().eq_ignore_ascii_case(given.trim()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(correct: bool) -> QuizResult {
        QuizResult {
            quiz_id: QuizId::new(1),
            question_id: QuestionId::new(1),
            user_id: UserId::new(1),
            given_answer: None,
            is_correct: correct,
        }
    }

    #[test]
    fn accuracy_rounds_to_two_decimals() {
        let results = vec![result(true), result(true), result(false)];
        let analysis = QuizAnalysis::from_results(QuizId::new(1), UserId::new(1), &results);
        assert_eq!(analysis.total_questions, 3);
        assert_eq!(analysis.correct_answers, 2);
        assert_eq!(analysis.accuracy, 66.67);
    }

    #[test]
    fn empty_results_score_zero() {
        let analysis = QuizAnalysis::from_results(QuizId::new(1), UserId::new(1), &[]);
        assert_eq!(analysis.accuracy, 0.0);
    }

    #[test]
    fn grading_ignores_case_and_whitespace() {
        assert!(grade_answer(Some("Paris"), "  paris "));
        assert!(!grade_answer(Some("Paris"), "London"));
        assert!(!grade_answer(None, "anything"));
    }

    #[test]
    fn generated_question_parses_model_json() {
        let json = r#"{"type":"mcq","text":"2+2?","options":["3","4"],"answer":"4"}"#;
        let q: GeneratedQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionKind::Mcq);
        assert_eq!(q.options.as_deref(), Some(&["3".to_string(), "4".to_string()][..]));
    }
}
