//! Auth handlers: signup with email verification, login.

pub mod id_login;
pub mod login;
pub mod signup;
pub mod verify_email;

pub use id_login::{IdLoginCommand, IdLoginHandler};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use signup::{SignupCommand, SignupHandler, SignupResult};
pub use verify_email::{VerifyEmailCommand, VerifyEmailHandler, VerifyEmailResult};

use crate::application::auth::TokenError;
use crate::domain::foundation::DomainError;
use crate::ports::EmailError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email is already registered")]
    EmailTaken,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account email is not verified")]
    NotVerified,

    #[error("no pending signup for this email")]
    NoPendingSignup,

    #[error("verification code is incorrect")]
    CodeMismatch,

    #[error("verification code has expired")]
    CodeExpired,

    #[error("could not issue access token: {0}")]
    Token(#[from] TokenError),

    #[error("could not send verification email: {0}")]
    Email(#[from] EmailError),

    #[error(transparent)]
    Store(#[from] DomainError),
}
