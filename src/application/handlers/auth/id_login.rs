//! IdLoginHandler - re-authenticate with an existing token.

use std::sync::Arc;

use crate::application::auth::TokenIssuer;
use crate::domain::user::User;
use crate::ports::UserStore;

use super::AuthError;

#[derive(Debug, Clone)]
pub struct IdLoginCommand {
    pub token: String,
}

pub struct IdLoginHandler {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenIssuer>,
}

impl IdLoginHandler {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: IdLoginCommand) -> Result<User, AuthError> {
        let user_id = self.tokens.verify(&cmd.token)?;
        let Some(user) = self.users.find_by_id(user_id).await? else {
            // Token is valid but the account no longer exists.
            return Err(AuthError::InvalidCredentials);
        };
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserStore;
    use crate::application::auth::TokenError;
    use secrecy::Secret;

    fn tokens() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(
            &Secret::new("0123456789abcdef0123456789abcdef".into()),
            5,
        ))
    }

    #[tokio::test]
    async fn valid_token_returns_the_user() {
        let users = Arc::new(InMemoryUserStore::new());
        let id = users.seed_user("sam", "sam@example.com", "hash").await;
        let tokens = tokens();
        let token = tokens.issue(id).unwrap();
        let handler = IdLoginHandler::new(users, tokens);

        let user = handler.handle(IdLoginCommand { token }).await.unwrap();
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let handler = IdLoginHandler::new(Arc::new(InMemoryUserStore::new()), tokens());
        let err = handler
            .handle(IdLoginCommand {
                token: "nonsense".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Token(TokenError::Invalid)));
    }

    #[tokio::test]
    async fn token_for_deleted_account_is_rejected() {
        let tokens = tokens();
        let token = tokens.issue(crate::domain::foundation::UserId::new(99)).unwrap();
        let handler = IdLoginHandler::new(Arc::new(InMemoryUserStore::new()), tokens);
        let err = handler.handle(IdLoginCommand { token }).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
