//! Document handlers: upload with indexing, listing, deletion.

pub mod delete_document;
pub mod list_documents;
pub mod upload_document;

pub use delete_document::{DeleteDocumentCommand, DeleteDocumentHandler};
pub use list_documents::{ListDocumentsHandler, ListDocumentsQuery};
pub use upload_document::{UploadDocumentCommand, UploadDocumentHandler};
