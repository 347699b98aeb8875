//! Ports - interfaces between the application core and the outside world.
//!
//! Outbound ports are traits the application calls; adapters implement them.
//! Everything here is behaviour only, no provider or database types leak in.

pub mod chat_store;
pub mod document_index;
pub mod document_store;
pub mod email_sender;
pub mod embedding_model;
pub mod file_storage;
pub mod image_generator;
pub mod language_model;
pub mod mindmap_store;
pub mod pending_signup_store;
pub mod quiz_store;
pub mod search_provider;
pub mod user_store;
pub mod workspace_store;

pub use chat_store::ChatStore;
pub use document_index::{DocumentIndex, IndexError};
pub use document_store::DocumentStore;
pub use email_sender::{EmailError, EmailSender};
pub use embedding_model::EmbeddingModel;
pub use file_storage::{FileArea, FileStorage, StorageError};
pub use image_generator::ImageGenerator;
pub use language_model::{
    CompletionRequest, LanguageModel, ModelError, ModelMessage, ModelRole,
};
pub use mindmap_store::{MindmapStore, TreeNodeRecord, TreeRecord};
pub use pending_signup_store::PendingSignupStore;
pub use quiz_store::{AnswerSubmission, QuizStore};
pub use search_provider::{SearchError, SearchProvider};
pub use user_store::{NewUser, UserStore};
pub use workspace_store::WorkspaceStore;
