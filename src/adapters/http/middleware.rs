//! Bearer-token authentication middleware and extractor.
//!
//! The middleware validates `Authorization: Bearer <jwt>` headers and injects
//! the caller's id into request extensions; `CurrentUser` pulls it back out in
//! handlers. Routes that never see a valid token still run, so public routes
//! (auth) and protected routes can share the same layer.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::auth::{TokenError, TokenIssuer};
use crate::domain::foundation::UserId;

use super::error::{error_response, ErrorResponse};

pub async fn auth_middleware(
    State(tokens): State<Arc<TokenIssuer>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match tokens.verify(token) {
            Ok(user_id) => {
                request.extensions_mut().insert(user_id);
                next.run(request).await
            }
            Err(TokenError::Expired) => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("token has expired", "TOKEN_EXPIRED"),
            ),
            Err(_) => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("token is invalid", "TOKEN_INVALID"),
            ),
        },
        // No token: handlers that need one reject via CurrentUser.
        None => next.run(request).await,
    }
}

/// Extractor for the authenticated caller's id.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserId>()
            .copied()
            .map(CurrentUser)
            .ok_or_else(|| {
                error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("authentication required", "UNAUTHENTICATED"),
                )
                .into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    #[tokio::test]
    async fn current_user_reads_extensions() {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(UserId::new(7));
        let (mut parts, _) = request.into_parts();

        let CurrentUser(user_id) = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user_id, UserId::new(7));
    }

    #[tokio::test]
    async fn current_user_rejects_when_absent() {
        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }
}
