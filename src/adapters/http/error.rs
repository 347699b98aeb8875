//! JSON error payloads and status mappings for the REST API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::application::auth::TokenError;
use crate::application::handlers::auth::AuthError;
use crate::application::handlers::generated_doc::GeneratedDocError;
use crate::application::handlers::mindmap::MindmapHandlerError;
use crate::application::handlers::quiz::QuizError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::StorageError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "BAD_REQUEST")
    }
}

pub fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = match self.code() {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            _ => {
                error!(%self, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Internal details stay out of the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal error".to_string()
        } else {
            self.message().to_string()
        };
        error_response(status, ErrorResponse::new(message, self.code().to_string()))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            AuthError::EmailTaken | AuthError::UsernameTaken => {
                (StatusCode::CONFLICT, "ALREADY_EXISTS")
            }
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::NotVerified => (StatusCode::FORBIDDEN, "NOT_VERIFIED"),
            AuthError::NoPendingSignup => (StatusCode::NOT_FOUND, "NO_PENDING_SIGNUP"),
            AuthError::CodeMismatch => (StatusCode::BAD_REQUEST, "CODE_MISMATCH"),
            AuthError::CodeExpired => (StatusCode::BAD_REQUEST, "CODE_EXPIRED"),
            AuthError::Token(TokenError::Expired) => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AuthError::Token(TokenError::Invalid) => (StatusCode::UNAUTHORIZED, "TOKEN_INVALID"),
            AuthError::Token(TokenError::Issue(_)) | AuthError::Email(_) => {
                error!(%self, "auth infrastructure error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            AuthError::Store(e) => return e.clone().into_response(),
        };
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal error".to_string()
        } else {
            self.to_string()
        };
        error_response(status, ErrorResponse::new(message, code))
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        match self {
            QuizError::Validation(message) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "VALIDATION_FAILED"),
            ),
            QuizError::Generation(e) => {
                error!(%e, "quiz generation failed");
                error_response(
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new("quiz generation failed", "GENERATION_FAILED"),
                )
            }
            QuizError::Store(e) => e.into_response(),
        }
    }
}

impl IntoResponse for MindmapHandlerError {
    fn into_response(self) -> Response {
        match self {
            MindmapHandlerError::Validation(message) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "VALIDATION_FAILED"),
            ),
            MindmapHandlerError::EmptyGeneration => error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("the topic produced an empty mindmap", "EMPTY_MINDMAP"),
            ),
            MindmapHandlerError::Generation(e) => {
                error!(%e, "mindmap generation failed");
                error_response(
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new("mindmap generation failed", "GENERATION_FAILED"),
                )
            }
            MindmapHandlerError::Store(e) => e.into_response(),
        }
    }
}

impl IntoResponse for GeneratedDocError {
    fn into_response(self) -> Response {
        match self {
            GeneratedDocError::Validation(message) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "VALIDATION_FAILED"),
            ),
            GeneratedDocError::Model(e) => {
                error!(%e, "document generation failed");
                error_response(
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new("document generation failed", "GENERATION_FAILED"),
                )
            }
            GeneratedDocError::Storage(e) => storage_error_response(e),
            GeneratedDocError::Store(e) => e.into_response(),
        }
    }
}

pub fn storage_error_response(error: StorageError) -> Response {
    match error {
        StorageError::NotFound(name) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(format!("file not found: {name}"), "NOT_FOUND"),
        ),
        StorageError::InvalidName(name) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(format!("file name is not allowed: {name}"), "INVALID_NAME"),
        ),
        StorageError::Io(e) => {
            error!(%e, "file storage io error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("internal error", "STORAGE_ERROR"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_by_code() {
        let not_found = DomainError::not_found("Quiz", 3).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let validation = DomainError::validation("bad input").into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let database = DomainError::database("boom").into_response();
        assert_eq!(database.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_mindmap_is_unprocessable_not_server_error() {
        let response = MindmapHandlerError::EmptyGeneration.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn expired_and_invalid_tokens_are_distinct() {
        let expired = AuthError::Token(TokenError::Expired).into_response();
        let invalid = AuthError::Token(TokenError::Invalid).into_response();
        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);
    }
}
