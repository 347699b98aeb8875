//! Foundation types shared across the domain: identifiers and coded errors.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode};
pub use ids::{
    ChatMessageId, DocumentId, GeneratedDocId, QuestionId, QuizId, TreeId, TreeNodeId, UserId,
    WorkspaceId,
};
