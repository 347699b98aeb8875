//! Email Sender Port - outbound transactional mail.

use async_trait::async_trait;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), EmailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email request failed: {0}")]
    Network(String),

    #[error("email provider rejected the message: {0}")]
    Rejected(String),
}
