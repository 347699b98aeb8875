//! HTTP surface for quizzes, questions, submissions and analysis.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::quiz::{
    AddQuestionCommand, AddQuestionHandler, CheckAnswerCommand, CheckAnswerHandler,
    CreateQuizCommand, CreateQuizHandler, DeleteQuestionCommand, DeleteQuestionHandler,
    DeleteQuizCommand, DeleteQuizHandler, GetQuizHandler, GetQuizQuery, GetResultsHandler,
    GetResultsQuery, ListQuestionsHandler, ListQuestionsQuery, ListQuizzesHandler,
    ListQuizzesQuery, QuizAnalysisHandler, QuizAnalysisQuery, SubmitQuizCommand,
    SubmitQuizHandler,
};
use crate::domain::foundation::{QuestionId, QuizId, WorkspaceId};
use crate::domain::quiz::{GeneratedQuestion, QuestionKind};
use crate::ports::AnswerSubmission;

use super::middleware::CurrentUser;

#[derive(Clone)]
pub struct QuizHandlers {
    pub create: Arc<CreateQuizHandler>,
    pub list: Arc<ListQuizzesHandler>,
    pub get: Arc<GetQuizHandler>,
    pub delete: Arc<DeleteQuizHandler>,
    pub add_question: Arc<AddQuestionHandler>,
    pub list_questions: Arc<ListQuestionsHandler>,
    pub delete_question: Arc<DeleteQuestionHandler>,
    pub submit: Arc<SubmitQuizHandler>,
    pub results: Arc<GetResultsHandler>,
    pub analysis: Arc<QuizAnalysisHandler>,
    pub check: Arc<CheckAnswerHandler>,
}

pub fn quiz_routes(handlers: QuizHandlers) -> Router {
    Router::new()
        .route("/", post(create_quiz))
        .route("/check", post(check_answer))
        .route("/workspace/:workspace_id", get(list_quizzes))
        .route("/:id", get(get_quiz).delete(delete_quiz))
        .route("/:id/submit", post(submit_quiz))
        .route("/:id/results/:user_id", get(get_results))
        .route("/:id/analyze/:user_id", get(analyze_quiz))
        .with_state(handlers)
}

/// Questions live under their own prefix: the client addresses them by
/// id alone. GET takes a workspace id, DELETE a question id; both methods
/// share one registration since axum allows only one capture name per
/// segment.
pub fn question_routes(handlers: QuizHandlers) -> Router {
    Router::new()
        .route("/", post(add_question))
        .route("/:id", get(list_questions).delete(delete_question))
        .with_state(handlers)
}

#[derive(Debug, Deserialize)]
struct CreateQuizRequest {
    workspace_id: i64,
    topic: String,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    kinds: Vec<QuestionKind>,
    #[serde(default)]
    created_for: Option<i64>,
}

const DEFAULT_QUESTION_COUNT: usize = 5;

async fn create_quiz(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateQuizRequest>,
) -> Response {
    let cmd = CreateQuizCommand {
        workspace_id: WorkspaceId::new(req.workspace_id),
        user_id,
        topic: req.topic,
        count: req.count.unwrap_or(DEFAULT_QUESTION_COUNT),
        kinds: req.kinds,
        created_for: req.created_for.map(crate::domain::foundation::UserId::new),
    };
    match handlers.create.handle(cmd).await {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_quizzes(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Response {
    let query = ListQuizzesQuery {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
    };
    match handlers.list.handle(query).await {
        Ok(quizzes) => (StatusCode::OK, Json(quizzes)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_quiz(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let query = GetQuizQuery {
        quiz_id: QuizId::new(id),
        user_id,
    };
    match handlers.get.handle(query).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_quiz(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let cmd = DeleteQuizCommand {
        quiz_id: QuizId::new(id),
        user_id,
    };
    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct AddQuestionRequest {
    quiz_id: i64,
    kind: QuestionKind,
    text: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    created_for: Option<i64>,
}

async fn add_question(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<AddQuestionRequest>,
) -> Response {
    let cmd = AddQuestionCommand {
        quiz_id: QuizId::new(req.quiz_id),
        user_id,
        question: GeneratedQuestion {
            kind: req.kind,
            text: req.text,
            options: req.options,
            answer: req.answer,
        },
        created_for: req.created_for.map(crate::domain::foundation::UserId::new),
    };
    match handlers.add_question.handle(cmd).await {
        Ok(question) => (StatusCode::CREATED, Json(question)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_questions(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Response {
    let query = ListQuestionsQuery {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
    };
    match handlers.list_questions.handle(query).await {
        Ok(questions) => (StatusCode::OK, Json(questions)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_question(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let cmd = DeleteQuestionCommand {
        question_id: QuestionId::new(id),
        user_id,
    };
    match handlers.delete_question.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Deserialize)]
struct SubmittedAnswer {
    question_id: i64,
    answer: String,
}

async fn submit_quiz(
    State(handlers): State<QuizHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<SubmitRequest>,
) -> Response {
    let cmd = SubmitQuizCommand {
        quiz_id: QuizId::new(id),
        user_id,
        answers: req
            .answers
            .into_iter()
            .map(|a| AnswerSubmission {
                question_id: QuestionId::new(a.question_id),
                given_answer: a.answer,
            })
            .collect(),
    };
    match handlers.submit.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

// Results and analysis address a subject user explicitly: a quiz creator
// can inspect the results of whoever the quiz was made for.
async fn get_results(
    State(handlers): State<QuizHandlers>,
    CurrentUser(_user_id): CurrentUser,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Response {
    let query = GetResultsQuery {
        quiz_id: QuizId::new(id),
        user_id: crate::domain::foundation::UserId::new(user_id),
    };
    match handlers.results.handle(query).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn analyze_quiz(
    State(handlers): State<QuizHandlers>,
    CurrentUser(_user_id): CurrentUser,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Response {
    let query = QuizAnalysisQuery {
        quiz_id: QuizId::new(id),
        user_id: crate::domain::foundation::UserId::new(user_id),
    };
    match handlers.analysis.handle(query).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct CheckRequest {
    question: String,
    answer: String,
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    correct: bool,
}

async fn check_answer(
    State(handlers): State<QuizHandlers>,
    CurrentUser(_user_id): CurrentUser,
    Json(req): Json<CheckRequest>,
) -> Response {
    let cmd = CheckAnswerCommand {
        question: req.question,
        given_answer: req.answer,
    };
    match handlers.check.handle(cmd).await {
        Ok(correct) => (StatusCode::OK, Json(CheckResponse { correct })).into_response(),
        Err(e) => e.into_response(),
    }
}
