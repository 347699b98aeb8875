//! Authentication configuration (JWT + password hashing + signup verification)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (HS256)
    pub jwt_secret: Secret<String>,

    /// Pepper mixed into password hashes, independent of the per-user salt
    pub password_pepper: Secret<String>,

    /// Session token lifetime in days
    #[serde(default = "default_token_days")]
    pub token_lifetime_days: i64,

    /// Signup verification code lifetime in minutes
    #[serde(default = "default_code_minutes")]
    pub code_lifetime_minutes: i64,
}

impl AuthConfig {
    pub fn jwt_secret(&self) -> &str {
        self.jwt_secret.expose_secret()
    }

    pub fn password_pepper(&self) -> &str {
        self.password_pepper.expose_secret()
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_lifetime_days <= 0 {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        if self.code_lifetime_minutes <= 0 {
            return Err(ValidationError::InvalidCodeLifetime);
        }
        Ok(())
    }
}

fn default_token_days() -> i64 {
    5
}

fn default_code_minutes() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            password_pepper: Secret::new("pepper".to_string()),
            token_lifetime_days: default_token_days(),
            code_lifetime_minutes: default_code_minutes(),
        }
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        assert!(config("short").validate().is_err());
    }

    #[test]
    fn long_enough_secret_passes() {
        assert!(config("0123456789abcdef0123456789abcdef").validate().is_ok());
    }

    #[test]
    fn defaults_match_original_lifetimes() {
        let c = config("0123456789abcdef0123456789abcdef");
        assert_eq!(c.token_lifetime_days, 5);
        assert_eq!(c.code_lifetime_minutes, 10);
    }
}
