//! Mindmap handlers: generation with persistence, listing, deletion.

pub mod create_mindmap;
pub mod delete_mindmap;
pub mod list_mindmaps;

pub use create_mindmap::{CreateMindmapCommand, CreateMindmapHandler, CreateMindmapResult};
pub use delete_mindmap::{DeleteMindmapCommand, DeleteMindmapHandler};
pub use list_mindmaps::{ListMindmapsHandler, ListMindmapsQuery, MindmapView};

use crate::application::mindmap::MindmapError;
use crate::domain::foundation::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum MindmapHandlerError {
    #[error("validation failed: {0}")]
    Validation(String),

    /// The model expanded the topic into nothing. Distinct from a failed
    /// generation; callers report it as an unprocessable request, not a
    /// server error.
    #[error("the topic produced an empty mindmap")]
    EmptyGeneration,

    #[error(transparent)]
    Generation(#[from] MindmapError),

    #[error(transparent)]
    Store(#[from] DomainError),
}
