//! VerifyEmailHandler - turns a pending signup into a real account.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::auth::TokenIssuer;
use crate::domain::user::User;
use crate::ports::{NewUser, PendingSignupStore, UserStore};

use super::AuthError;

#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct VerifyEmailResult {
    pub user: User,
    pub token: String,
}

pub struct VerifyEmailHandler {
    users: Arc<dyn UserStore>,
    pending: Arc<dyn PendingSignupStore>,
    tokens: Arc<TokenIssuer>,
}

impl VerifyEmailHandler {
    pub fn new(
        users: Arc<dyn UserStore>,
        pending: Arc<dyn PendingSignupStore>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            users,
            pending,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: VerifyEmailCommand) -> Result<VerifyEmailResult, AuthError> {
        let email = cmd.email.trim().to_lowercase();

        let Some(stored) = self.users.find_verification_code(&email).await? else {
            return Err(AuthError::CodeMismatch);
        };
        if stored.is_expired(Utc::now()) {
            self.users.delete_verification_code(&email).await?;
            return Err(AuthError::CodeExpired);
        }
        if !stored.code.eq_ignore_ascii_case(cmd.code.trim()) {
            return Err(AuthError::CodeMismatch);
        }

        let Some(signup) = self.pending.take(&email).await else {
            return Err(AuthError::NoPendingSignup);
        };

        let user = self
            .users
            .insert(NewUser {
                username: signup.username,
                email: email.clone(),
                password_hash: signup.password_hash,
                dob: signup.dob,
            })
            .await?;
        self.users.mark_verified(user.id).await?;
        self.users.delete_verification_code(&email).await?;

        let token = self.tokens.issue(user.id)?;
        info!(%email, user_id = %user.id, "email verified, account created");

        Ok(VerifyEmailResult {
            user: User {
                is_verified: true,
                ..user
            },
            token,
        })
    }
}
