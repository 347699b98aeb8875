//! User Store Port - account persistence plus verification codes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{User, VerificationCode};

/// Fields needed to create a verified account row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub dob: NaiveDate,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn mark_verified(&self, id: UserId) -> Result<(), DomainError>;

    /// Store a verification code, replacing any prior code for the email.
    async fn upsert_verification_code(&self, code: VerificationCode) -> Result<(), DomainError>;

    async fn find_verification_code(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError>;

    async fn delete_verification_code(&self, email: &str) -> Result<(), DomainError>;
}
