//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("JWT secret must be at least 32 bytes")]
    JwtSecretTooShort,

    #[error("Token lifetime must be non-zero")]
    InvalidTokenLifetime,

    #[error("Verification code lifetime must be non-zero")]
    InvalidCodeLifetime,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Storage path must not be empty: {0}")]
    EmptyStoragePath(&'static str),
}
