//! Access tokens - HS256 JWTs carrying the user id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token could not be issued: {0}")]
    Issue(String),

    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,
}

pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &Secret<String>, lifetime_days: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            lifetime: Duration::days(lifetime_days),
        }
    }

    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.lifetime).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Validates the token and returns the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;
        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            &Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            5,
        )
    }

    #[test]
    fn issued_token_verifies_to_same_user() {
        let issuer = issuer();
        let token = issuer.issue(UserId::new(42)).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), UserId::new(42));
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert!(matches!(
            issuer().verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn expired_token_reports_expiry() {
        let short_lived = TokenIssuer::new(
            &Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            -1,
        );
        let token = short_lived.issue(UserId::new(1)).unwrap();
        assert!(matches!(issuer().verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn token_from_another_secret_is_invalid() {
        let other = TokenIssuer::new(
            &Secret::new("ffffffffffffffffffffffffffffffff".to_string()),
            5,
        );
        let token = other.issue(UserId::new(1)).unwrap();
        assert!(issuer().verify(&token).is_err());
    }
}
