//! Users and the signup verification workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::foundation::UserId;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Salted HMAC-SHA256 hash, formatted as `<salt-hex>$<mac-hex>`.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub dob: NaiveDate,
    pub is_verified: bool,
}

impl User {
    /// Age in whole years as of `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.years_since(self.dob).unwrap_or(0) as i32;
        if age < 0 {
            age = 0;
        }
        age
    }
}

/// A signup awaiting email verification. Held only in the expiring
/// pending-signup store, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSignup {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub dob: NaiveDate,
}

/// A persisted verification code with its expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationCode {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn age_is_computed_from_dob() {
        let user = User {
            id: UserId::new(1),
            username: "sam".into(),
            email: "sam@example.com".into(),
            password_hash: String::new(),
            dob: NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
            is_verified: true,
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(user.age_on(today), 23);
        let today = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert_eq!(user.age_on(today), 24);
    }

    #[test]
    fn verification_code_expiry() {
        let code = VerificationCode {
            email: "a@b.c".into(),
            code: "abc123".into(),
            expires_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        assert!(code.is_expired(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()));
        assert!(!code.is_expired(Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap()));
    }
}
