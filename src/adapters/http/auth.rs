//! HTTP surface for signup, verification and login.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::auth::{
    IdLoginCommand, IdLoginHandler, LoginCommand, LoginHandler, SignupCommand, SignupHandler,
    VerifyEmailCommand, VerifyEmailHandler,
};
use crate::domain::user::User;

#[derive(Clone)]
pub struct AuthHandlers {
    pub signup: Arc<SignupHandler>,
    pub verify: Arc<VerifyEmailHandler>,
    pub login: Arc<LoginHandler>,
    pub id_login: Arc<IdLoginHandler>,
}

pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/verify", post(verify_email))
        .route("/login", post(login))
        .route("/idlogin", post(id_login))
        .with_state(handlers)
}

#[derive(Debug, Deserialize)]
struct SignupRequest {
    username: String,
    email: String,
    password: String,
    dob: NaiveDate,
}

#[derive(Debug, Serialize)]
struct SignupResponse {
    email: String,
    message: &'static str,
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    email: String,
    code: String,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    id: i64,
    username: String,
    email: String,
    dob: NaiveDate,
    is_verified: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i64(),
            username: user.username,
            email: user.email,
            dob: user.dob,
            is_verified: user.is_verified,
        }
    }
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    user: UserResponse,
    token: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct IdLoginRequest {
    token: String,
}

async fn signup(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<SignupRequest>,
) -> Response {
    let cmd = SignupCommand {
        username: req.username,
        email: req.email,
        password: req.password,
        dob: req.dob,
    };
    match handlers.signup.handle(cmd).await {
        Ok(result) => (
            StatusCode::ACCEPTED,
            Json(SignupResponse {
                email: result.email,
                message: "verification code sent",
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn verify_email(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<VerifyRequest>,
) -> Response {
    let cmd = VerifyEmailCommand {
        email: req.email,
        code: req.code,
    };
    match handlers.verify.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SessionResponse {
                user: result.user.into(),
                token: result.token,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn login(State(handlers): State<AuthHandlers>, Json(req): Json<LoginRequest>) -> Response {
    let cmd = LoginCommand {
        email: req.email,
        password: req.password,
    };
    match handlers.login.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SessionResponse {
                user: result.user.into(),
                token: result.token,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn id_login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<IdLoginRequest>,
) -> Response {
    match handlers
        .id_login
        .handle(IdLoginCommand { token: req.token })
        .await
    {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(e) => e.into_response(),
    }
}
