//! SignupHandler - starts a signup and emails a verification code.
//!
//! No account row exists until the email is verified; the signup itself
//! lives in the expiring pending-signup store and is dropped if never
//! verified.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::application::auth::{generate_verification_code, PasswordHasher};
use crate::domain::user::{PendingSignup, VerificationCode};
use crate::ports::{EmailSender, PendingSignupStore, UserStore};

use super::AuthError;

const CODE_LEN: usize = 6;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub dob: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct SignupResult {
    pub email: String,
}

pub struct SignupHandler {
    users: Arc<dyn UserStore>,
    pending: Arc<dyn PendingSignupStore>,
    email: Arc<dyn EmailSender>,
    hasher: Arc<PasswordHasher>,
    code_lifetime_minutes: i64,
}

impl SignupHandler {
    pub fn new(
        users: Arc<dyn UserStore>,
        pending: Arc<dyn PendingSignupStore>,
        email: Arc<dyn EmailSender>,
        hasher: Arc<PasswordHasher>,
        code_lifetime_minutes: i64,
    ) -> Self {
        Self {
            users,
            pending,
            email,
            hasher,
            code_lifetime_minutes,
        }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, AuthError> {
        let username = cmd.username.trim();
        let email = cmd.email.trim().to_lowercase();
        if username.is_empty() {
            return Err(AuthError::Validation("username must not be empty".into()));
        }
        if !email.contains('@') {
            return Err(AuthError::Validation("email address is invalid".into()));
        }
        if cmd.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        self.pending
            .put(PendingSignup {
                username: username.to_string(),
                email: email.clone(),
                password_hash: self.hasher.hash(&cmd.password),
                dob: cmd.dob,
            })
            .await;

        let code = generate_verification_code(CODE_LEN);
        self.users
            .upsert_verification_code(VerificationCode {
                email: email.clone(),
                code: code.clone(),
                expires_at: Utc::now() + Duration::minutes(self.code_lifetime_minutes),
            })
            .await?;

        self.email
            .send(
                &email,
                "Verify your email",
                &format!(
                    "<p>Hi {username},</p><p>Your verification code is \
                     <strong>{code}</strong>. It expires in {} minutes.</p>",
                    self.code_lifetime_minutes
                ),
            )
            .await?;

        info!(%email, "signup started, verification code sent");
        Ok(SignupResult { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEmailSender, InMemoryUserStore};
    use crate::adapters::verification::ExpiringSignupStore;
    use secrecy::Secret;

    fn handler(
        users: Arc<InMemoryUserStore>,
        pending: Arc<ExpiringSignupStore>,
        email: Arc<InMemoryEmailSender>,
    ) -> SignupHandler {
        SignupHandler::new(
            users,
            pending,
            email,
            Arc::new(PasswordHasher::new(Secret::new("pepper".into()))),
            10,
        )
    }

    fn command() -> SignupCommand {
        SignupCommand {
            username: "sam".into(),
            email: "Sam@Example.com".into(),
            password: "correct horse".into(),
            dob: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn signup_stores_pending_and_sends_code() {
        let users = Arc::new(InMemoryUserStore::new());
        let pending = Arc::new(ExpiringSignupStore::new());
        let email = Arc::new(InMemoryEmailSender::new());
        let handler = handler(users.clone(), pending.clone(), email.clone());

        let result = handler.handle(command()).await.unwrap();
        assert_eq!(result.email, "sam@example.com");

        assert!(pending.get("sam@example.com").await.is_some());
        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "sam@example.com");

        let code = users
            .find_verification_code("sam@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(code.code.len(), CODE_LEN);
        assert!(sent[0].body.contains(&code.code));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let handler = handler(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(ExpiringSignupStore::new()),
            Arc::new(InMemoryEmailSender::new()),
        );
        let mut cmd = command();
        cmd.password = "short".into();
        assert!(matches!(
            handler.handle(cmd).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let users = Arc::new(InMemoryUserStore::new());
        users.seed_user("sam", "sam@example.com", "hash").await;
        let handler = handler(
            users,
            Arc::new(ExpiringSignupStore::new()),
            Arc::new(InMemoryEmailSender::new()),
        );
        assert!(matches!(
            handler.handle(command()).await,
            Err(AuthError::EmailTaken)
        ));
    }
}
