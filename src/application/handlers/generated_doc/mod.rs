//! Handlers for AI-generated artifacts (summaries and images).

pub mod create_generated_doc;
pub mod delete_generated_doc;
pub mod list_generated_docs;

pub use create_generated_doc::{CreateGeneratedDocCommand, CreateGeneratedDocHandler};
pub use delete_generated_doc::{DeleteGeneratedDocCommand, DeleteGeneratedDocHandler};
pub use list_generated_docs::{ListGeneratedDocsHandler, ListGeneratedDocsQuery};

use crate::domain::foundation::DomainError;
use crate::ports::{ModelError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum GeneratedDocError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("generation failed: {0}")]
    Model(#[from] ModelError),

    #[error("could not store the file: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] DomainError),
}
