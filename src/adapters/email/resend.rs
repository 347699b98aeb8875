//! Resend transactional-email adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::config::EmailConfig;
use crate::ports::{EmailError, EmailSender};

pub struct ResendEmailSender {
    config: EmailConfig,
    client: Client,
}

impl ResendEmailSender {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), EmailError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&SendRequest {
                from: &self.config.from_address,
                to: [to],
                subject,
                html: html_body,
            })
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected(format!("status {status}: {body}")));
        }
        info!(%to, subject, "email sent");
        Ok(())
    }
}
