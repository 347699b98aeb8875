//! Workspace handlers.

pub mod create_workspace;
pub mod delete_workspace;
pub mod list_workspaces;
pub mod rename_workspace;

pub use create_workspace::{CreateWorkspaceCommand, CreateWorkspaceHandler};
pub use delete_workspace::{DeleteWorkspaceCommand, DeleteWorkspaceHandler};
pub use list_workspaces::{ListWorkspacesHandler, ListWorkspacesQuery};
pub use rename_workspace::{RenameWorkspaceCommand, RenameWorkspaceHandler};
