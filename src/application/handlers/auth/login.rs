//! LoginHandler - password login returning an access token.

use std::sync::Arc;

use tracing::info;

use crate::application::auth::{PasswordHasher, TokenIssuer};
use crate::domain::user::User;
use crate::ports::UserStore;

use super::AuthError;

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

pub struct LoginHandler {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        let email = cmd.email.trim().to_lowercase();

        // Unknown email and wrong password produce the same error.
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !self.hasher.verify(&cmd.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_verified {
            return Err(AuthError::NotVerified);
        }

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginResult { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserStore;
    use secrecy::Secret;

    fn services() -> (Arc<PasswordHasher>, Arc<TokenIssuer>) {
        (
            Arc::new(PasswordHasher::new(Secret::new("pepper".into()))),
            Arc::new(TokenIssuer::new(
                &Secret::new("0123456789abcdef0123456789abcdef".into()),
                5,
            )),
        )
    }

    #[tokio::test]
    async fn valid_credentials_yield_a_token() {
        let (hasher, tokens) = services();
        let users = Arc::new(InMemoryUserStore::new());
        let id = users
            .seed_user("sam", "sam@example.com", &hasher.hash("correct horse"))
            .await;
        users.mark_verified(id).await.unwrap();
        let handler = LoginHandler::new(users, hasher, tokens.clone());

        let result = handler
            .handle(LoginCommand {
                email: "Sam@example.com".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();

        assert_eq!(tokens.verify(&result.token).unwrap(), result.user.id);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (hasher, tokens) = services();
        let users = Arc::new(InMemoryUserStore::new());
        let id = users
            .seed_user("sam", "sam@example.com", &hasher.hash("correct horse"))
            .await;
        users.mark_verified(id).await.unwrap();
        let handler = LoginHandler::new(users, hasher, tokens);

        let err = handler
            .handle(LoginCommand {
                email: "sam@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unverified_account_cannot_log_in() {
        let (hasher, tokens) = services();
        let users = Arc::new(InMemoryUserStore::new());
        users
            .seed_user("sam", "sam@example.com", &hasher.hash("correct horse"))
            .await;
        let handler = LoginHandler::new(users, hasher, tokens);

        let err = handler
            .handle(LoginCommand {
                email: "sam@example.com".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotVerified));
    }
}
