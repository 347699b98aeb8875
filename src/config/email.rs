//! Email configuration (Resend HTTP API)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: Secret<String>,

    /// Sender address for verification mail
    pub from_address: String,

    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl EmailConfig {
    pub fn api_key(&self) -> &str {
        self.resend_api_key.expose_secret()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !self.from_address.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://api.resend.com/emails".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_address_must_contain_at() {
        let config = EmailConfig {
            resend_api_key: Secret::new("re_xxx".to_string()),
            from_address: "not-an-address".to_string(),
            endpoint: default_endpoint(),
        };
        assert!(config.validate().is_err());
    }
}
