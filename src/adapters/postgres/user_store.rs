//! PostgreSQL implementation of UserStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{User, VerificationCode};
use crate::ports::{NewUser, UserStore};

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: UserId::new(row.get("id")),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        dob: row.get("dob"),
        is_verified: row.get("is_verified"),
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, dob, is_verified";

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, dob)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, dob, is_verified
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.dob)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::AlreadyExists,
                format!("user with email {} already exists", user.email),
            ),
            _ => DomainError::database(format!("failed to insert user: {e}")),
        })?;
        Ok(user_from_row(&row))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to fetch user: {e}")))?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch user by email: {e}")))?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch user by username: {e}")))?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn mark_verified(&self, id: UserId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET is_verified = TRUE WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to mark user verified: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }

    async fn upsert_verification_code(&self, code: VerificationCode) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO verification_codes (email, code, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email)
            DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(&code.email)
        .bind(&code.code)
        .bind(code.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to upsert verification code: {e}")))?;
        Ok(())
    }

    async fn find_verification_code(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let row = sqlx::query(
            "SELECT email, code, expires_at FROM verification_codes WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch verification code: {e}")))?;
        Ok(row.map(|row| VerificationCode {
            email: row.get("email"),
            code: row.get("code"),
            expires_at: row.get("expires_at"),
        }))
    }

    async fn delete_verification_code(&self, email: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM verification_codes WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete verification code: {e}")))?;
        Ok(())
    }
}
