//! Application handlers - one Command/Result handler per operation.

pub mod auth;
pub mod chat;
pub mod document;
pub mod generated_doc;
pub mod mindmap;
pub mod quiz;
pub mod workspace;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, WorkspaceId};
use crate::domain::workspace::Workspace;
use crate::ports::WorkspaceStore;

/// Loads the workspace and checks the caller owns it.
pub(crate) async fn owned_workspace(
    workspaces: &dyn WorkspaceStore,
    workspace_id: WorkspaceId,
    user_id: UserId,
) -> Result<Workspace, DomainError> {
    let Some(workspace) = workspaces.find_by_id(workspace_id).await? else {
        return Err(DomainError::not_found("workspace", workspace_id));
    };
    if workspace.user_id != user_id {
        return Err(DomainError::new(
            ErrorCode::Unauthorized,
            "workspace belongs to another user",
        ));
    }
    Ok(workspace)
}
