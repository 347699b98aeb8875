//! Mindmap Store Port - persisted trees and their flattened nodes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::foundation::{DomainError, TreeId, TreeNodeId, UserId, WorkspaceId};
use crate::domain::mindmap::FlatNode;

/// A saved tree's header row.
#[derive(Debug, Clone, Serialize)]
pub struct TreeRecord {
    pub id: TreeId,
    pub name: String,
    pub description: Option<String>,
    pub user_id: UserId,
    pub workspace_id: WorkspaceId,
    pub created_at: DateTime<Utc>,
}

/// A node row as stored, with database ids in place of breadth-first ones.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNodeRecord {
    pub id: TreeNodeId,
    pub label: String,
    pub parent_id: Option<TreeNodeId>,
    pub tree_id: TreeId,
}

#[async_trait]
pub trait MindmapStore: Send + Sync {
    /// Persist a tree and its nodes in one transaction. `nodes` come from a
    /// breadth-first flatten, so every parent index precedes its children and
    /// can be mapped to a database id before it is referenced.
    async fn insert_tree(
        &self,
        name: &str,
        description: Option<&str>,
        user_id: UserId,
        workspace_id: WorkspaceId,
        nodes: &[FlatNode],
    ) -> Result<TreeRecord, DomainError>;

    async fn find_tree(&self, id: TreeId) -> Result<Option<TreeRecord>, DomainError>;

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<TreeRecord>, DomainError>;

    /// Node rows for the tree, parents before children.
    async fn nodes(&self, tree_id: TreeId) -> Result<Vec<TreeNodeRecord>, DomainError>;

    async fn delete_tree(&self, id: TreeId) -> Result<(), DomainError>;
}
