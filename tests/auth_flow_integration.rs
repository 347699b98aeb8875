//! Signup, verification and login exercised as one flow over in-memory
//! ports.

use std::sync::Arc;

use chrono::NaiveDate;
use secrecy::Secret;

use agent_learn::adapters::memory::{InMemoryEmailSender, InMemoryUserStore};
use agent_learn::adapters::verification::ExpiringSignupStore;
use agent_learn::application::auth::{PasswordHasher, TokenIssuer};
use agent_learn::application::handlers::auth::{
    AuthError, IdLoginCommand, IdLoginHandler, LoginCommand, LoginHandler, SignupCommand,
    SignupHandler, VerifyEmailCommand, VerifyEmailHandler,
};
use agent_learn::ports::UserStore;

struct Fixture {
    users: Arc<InMemoryUserStore>,
    email: Arc<InMemoryEmailSender>,
    signup: SignupHandler,
    verify: VerifyEmailHandler,
    login: LoginHandler,
    id_login: IdLoginHandler,
}

fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserStore::new());
    let pending = Arc::new(ExpiringSignupStore::new());
    let email = Arc::new(InMemoryEmailSender::new());
    let hasher = Arc::new(PasswordHasher::new(Secret::new("pepper".to_string())));
    let tokens = Arc::new(TokenIssuer::new(
        &Secret::new("0123456789abcdef0123456789abcdef".to_string()),
        5,
    ));
    Fixture {
        users: users.clone(),
        email: email.clone(),
        signup: SignupHandler::new(
            users.clone(),
            pending.clone(),
            email,
            hasher.clone(),
            10,
        ),
        verify: VerifyEmailHandler::new(users.clone(), pending, tokens.clone()),
        login: LoginHandler::new(users.clone(), hasher, tokens.clone()),
        id_login: IdLoginHandler::new(users, tokens),
    }
}

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 15).unwrap()
}

fn signup_cmd() -> SignupCommand {
    SignupCommand {
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "correct horse".to_string(),
        dob: dob(),
    }
}

#[tokio::test]
async fn signup_verify_login_round_trip() {
    let f = fixture();

    f.signup.handle(signup_cmd()).await.unwrap();

    // No account until the code is confirmed.
    assert!(f
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .is_none());
    let sent = f.email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");

    let code = f
        .users
        .find_verification_code("ada@example.com")
        .await
        .unwrap()
        .unwrap()
        .code;
    let verified = f
        .verify
        .handle(VerifyEmailCommand {
            email: "ada@example.com".to_string(),
            code,
        })
        .await
        .unwrap();
    assert!(verified.user.is_verified);
    assert!(!verified.token.is_empty());

    let session = f
        .login
        .handle(LoginCommand {
            email: "ada@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.id, verified.user.id);

    // The issued token identifies the same account.
    let user = f
        .id_login
        .handle(IdLoginCommand {
            token: session.token,
        })
        .await
        .unwrap();
    assert_eq!(user.id, verified.user.id);
}

#[tokio::test]
async fn wrong_code_leaves_the_signup_pending() {
    let f = fixture();
    f.signup.handle(signup_cmd()).await.unwrap();

    let err = f
        .verify
        .handle(VerifyEmailCommand {
            email: "ada@example.com".to_string(),
            code: "000000".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::CodeMismatch));

    // The right code still works afterwards.
    let code = f
        .users
        .find_verification_code("ada@example.com")
        .await
        .unwrap()
        .unwrap()
        .code;
    let verified = f
        .verify
        .handle(VerifyEmailCommand {
            email: "ada@example.com".to_string(),
            code,
        })
        .await
        .unwrap();
    assert!(verified.user.is_verified);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let f = fixture();
    f.signup.handle(signup_cmd()).await.unwrap();
    let code = f
        .users
        .find_verification_code("ada@example.com")
        .await
        .unwrap()
        .unwrap()
        .code;
    f.verify
        .handle(VerifyEmailCommand {
            email: "ada@example.com".to_string(),
            code,
        })
        .await
        .unwrap();

    let err = f
        .login
        .handle(LoginCommand {
            email: "ada@example.com".to_string(),
            password: "wrong horse".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}
