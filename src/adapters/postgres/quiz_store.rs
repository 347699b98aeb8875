//! PostgreSQL implementation of QuizStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, QuestionId, QuizId, UserId, WorkspaceId};
use crate::domain::quiz::{grade_answer, GeneratedQuestion, Question, Quiz, QuizResult};
use crate::ports::{AnswerSubmission, QuizStore};

#[derive(Clone)]
pub struct PostgresQuizStore {
    pool: PgPool,
}

impl PostgresQuizStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn quiz_from_row(row: &sqlx::postgres::PgRow) -> Quiz {
    Quiz {
        id: QuizId::new(row.get("id")),
        title: row.get("title"),
        workspace_id: WorkspaceId::new(row.get("workspace_id")),
        user_id: UserId::new(row.get("user_id")),
        created_at: row.get("created_at"),
    }
}

fn question_from_row(row: &sqlx::postgres::PgRow) -> Result<Question, DomainError> {
    let kind: String = row.get("kind");
    let kind = kind.parse().map_err(DomainError::database)?;
    let options: serde_json::Value = row.get("options");
    let options = serde_json::from_value(options)
        .map_err(|e| DomainError::database(format!("corrupt question options: {e}")))?;
    Ok(Question {
        id: QuestionId::new(row.get("id")),
        kind,
        text: row.get("text"),
        options,
        correct_answer: row.get("correct_answer"),
        order_index: row.get("order_index"),
        quiz_id: QuizId::new(row.get("quiz_id")),
        created_for: UserId::new(row.get("created_for")),
    })
}

fn result_from_row(row: &sqlx::postgres::PgRow) -> QuizResult {
    QuizResult {
        quiz_id: QuizId::new(row.get("quiz_id")),
        question_id: QuestionId::new(row.get("question_id")),
        user_id: UserId::new(row.get("user_id")),
        given_answer: row.get("given_answer"),
        is_correct: row.get("is_correct"),
    }
}

const QUESTION_COLUMNS: &str =
    "id, kind, text, options, correct_answer, order_index, quiz_id, created_for";

#[async_trait]
impl QuizStore for PostgresQuizStore {
    async fn insert_quiz(
        &self,
        title: &str,
        user_id: UserId,
        workspace_id: WorkspaceId,
        questions: &[GeneratedQuestion],
        created_for: Option<UserId>,
    ) -> Result<Quiz, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("failed to start transaction: {e}")))?;

        let row = sqlx::query(
            r#"
            INSERT INTO quizzes (title, user_id, workspace_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, workspace_id, user_id, created_at
            "#,
        )
        .bind(title)
        .bind(user_id.as_i64())
        .bind(workspace_id.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert quiz: {e}")))?;
        let quiz = quiz_from_row(&row);

        let target = created_for.unwrap_or(user_id);
        for (index, question) in questions.iter().enumerate() {
            let options = serde_json::to_value(question.options.clone().unwrap_or_default())
                .map_err(|e| DomainError::database(format!("failed to encode options: {e}")))?;
            sqlx::query(
                r#"
                INSERT INTO questions
                    (kind, text, options, correct_answer, order_index, quiz_id, created_for)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(question.kind.as_str())
            .bind(&question.text)
            .bind(options)
            .bind(&question.answer)
            .bind(index as i32)
            .bind(quiz.id.as_i64())
            .bind(target.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("failed to insert question: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("failed to commit quiz: {e}")))?;
        Ok(quiz)
    }

    async fn find_quiz(&self, id: QuizId) -> Result<Option<Quiz>, DomainError> {
        let row = sqlx::query(
            "SELECT id, title, workspace_id, user_id, created_at FROM quizzes WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch quiz: {e}")))?;
        Ok(row.as_ref().map(quiz_from_row))
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Quiz>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, workspace_id, user_id, created_at
            FROM quizzes
            WHERE workspace_id = $1
            ORDER BY id
            "#,
        )
        .bind(workspace_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list quizzes: {e}")))?;
        Ok(rows.iter().map(quiz_from_row).collect())
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete quiz: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Quiz", id));
        }
        Ok(())
    }

    async fn questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = $1 ORDER BY order_index"
        ))
        .bind(quiz_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch questions: {e}")))?;
        rows.iter().map(question_from_row).collect()
    }

    async fn questions_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Question>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT q.{}
            FROM questions q
            JOIN quizzes z ON z.id = q.quiz_id
            WHERE z.workspace_id = $1
            ORDER BY q.quiz_id, q.order_index
            "#,
            QUESTION_COLUMNS.replace(", ", ", q.")
        ))
        .bind(workspace_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch questions: {e}")))?;
        rows.iter().map(question_from_row).collect()
    }

    async fn question_texts_for_user(&self, user_id: UserId) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query("SELECT text FROM questions WHERE created_for = $1")
            .bind(user_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to fetch question texts: {e}")))?;
        Ok(rows.iter().map(|row| row.get("text")).collect())
    }

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch question: {e}")))?;
        row.as_ref().map(question_from_row).transpose()
    }

    async fn insert_question(
        &self,
        quiz_id: QuizId,
        question: &GeneratedQuestion,
        created_for: UserId,
    ) -> Result<Question, DomainError> {
        let options = serde_json::to_value(question.options.clone().unwrap_or_default())
            .map_err(|e| DomainError::database(format!("failed to encode options: {e}")))?;
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO questions
                (kind, text, options, correct_answer, order_index, quiz_id, created_for)
            SELECT $1, $2, $3, $4, COALESCE(MAX(order_index) + 1, 0), $5, $6
            FROM questions WHERE quiz_id = $5
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(question.kind.as_str())
        .bind(&question.text)
        .bind(options)
        .bind(&question.answer)
        .bind(quiz_id.as_i64())
        .bind(created_for.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert question: {e}")))?;
        question_from_row(&row)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete question: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Question", id));
        }
        Ok(())
    }

    async fn record_results(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
        answers: &[AnswerSubmission],
    ) -> Result<Vec<QuizResult>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("failed to start transaction: {e}")))?;

        // A resubmission replaces the previous attempt wholesale.
        sqlx::query("DELETE FROM quiz_results WHERE quiz_id = $1 AND user_id = $2")
            .bind(quiz_id.as_i64())
            .bind(user_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("failed to clear prior results: {e}")))?;

        let mut results = Vec::with_capacity(answers.len());
        for answer in answers {
            let question_row = sqlx::query(
                "SELECT correct_answer FROM questions WHERE id = $1 AND quiz_id = $2",
            )
            .bind(answer.question_id.as_i64())
            .bind(quiz_id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("failed to fetch question: {e}")))?
            .ok_or_else(|| DomainError::not_found("Question", answer.question_id))?;

            let correct_answer: Option<String> = question_row.get("correct_answer");
            let is_correct = grade_answer(correct_answer.as_deref(), &answer.given_answer);

            sqlx::query(
                r#"
                INSERT INTO quiz_results (quiz_id, question_id, user_id, given_answer, is_correct)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(quiz_id.as_i64())
            .bind(answer.question_id.as_i64())
            .bind(user_id.as_i64())
            .bind(&answer.given_answer)
            .bind(is_correct)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("failed to insert result: {e}")))?;

            results.push(QuizResult {
                quiz_id,
                question_id: answer.question_id,
                user_id,
                given_answer: Some(answer.given_answer.clone()),
                is_correct,
            });
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("failed to commit results: {e}")))?;
        Ok(results)
    }

    async fn results_for_user(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> Result<Vec<QuizResult>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT quiz_id, question_id, user_id, given_answer, is_correct
            FROM quiz_results
            WHERE quiz_id = $1 AND user_id = $2
            ORDER BY question_id
            "#,
        )
        .bind(quiz_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch results: {e}")))?;
        Ok(rows.iter().map(result_from_row).collect())
    }
}
