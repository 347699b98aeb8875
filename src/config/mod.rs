//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `AGENT_LEARN`
//! prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use agent_learn::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod auth;
mod database;
mod email;
mod error;
mod search;
mod server;
mod storage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use search::SearchConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT, password pepper, signup codes)
    pub auth: AuthConfig,

    /// AI provider configuration (OpenAI-compatible)
    pub ai: AiConfig,

    /// Web search configuration (Serper)
    pub search: SearchConfig,

    /// Email configuration (Resend)
    pub email: EmailConfig,

    /// Filesystem layout
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file when present, then environment variables of the
    /// form `AGENT_LEARN__SECTION__KEY`, e.g. `AGENT_LEARN__SERVER__PORT=8080`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AGENT_LEARN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.ai.validate()?;
        self.search.validate()?;
        self.email.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("AGENT_LEARN__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var(
            "AGENT_LEARN__AUTH__JWT_SECRET",
            "0123456789abcdef0123456789abcdef",
        );
        env::set_var("AGENT_LEARN__AUTH__PASSWORD_PEPPER", "pepper");
        env::set_var("AGENT_LEARN__AI__OPENAI_API_KEY", "sk-xxx");
        env::set_var("AGENT_LEARN__SEARCH__SERPER_API_KEY", "serper-xxx");
        env::set_var("AGENT_LEARN__EMAIL__RESEND_API_KEY", "re_xxx");
        env::set_var("AGENT_LEARN__EMAIL__FROM_ADDRESS", "noreply@example.com");
    }

    fn clear_env() {
        env::remove_var("AGENT_LEARN__DATABASE__URL");
        env::remove_var("AGENT_LEARN__AUTH__JWT_SECRET");
        env::remove_var("AGENT_LEARN__AUTH__PASSWORD_PEPPER");
        env::remove_var("AGENT_LEARN__AI__OPENAI_API_KEY");
        env::remove_var("AGENT_LEARN__SEARCH__SERPER_API_KEY");
        env::remove_var("AGENT_LEARN__EMAIL__RESEND_API_KEY");
        env::remove_var("AGENT_LEARN__EMAIL__FROM_ADDRESS");
        env::remove_var("AGENT_LEARN__SERVER__PORT");
    }

    #[test]
    fn load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.ai.chat_model, "gpt-4o");
    }

    #[test]
    fn validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("AGENT_LEARN__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
