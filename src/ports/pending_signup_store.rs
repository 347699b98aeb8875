//! Pending Signup Store Port - signup data held until email verification.
//!
//! Entries expire on their own; a signup abandoned before verification never
//! becomes an account and is forgotten after its deadline passes.

use async_trait::async_trait;

use crate::domain::user::PendingSignup;

#[async_trait]
pub trait PendingSignupStore: Send + Sync {
    /// Store the signup keyed by email, replacing any earlier pending entry.
    async fn put(&self, signup: PendingSignup);

    /// Take the signup for the email if present and not expired. Expired
    /// entries are dropped and reported as absent.
    async fn take(&self, email: &str) -> Option<PendingSignup>;

    /// Peek without consuming, for resend flows.
    async fn get(&self, email: &str) -> Option<PendingSignup>;
}
