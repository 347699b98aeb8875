//! ListMindmapsHandler - saved trees rebuilt from their flat node rows.

use std::sync::Arc;

use tracing::warn;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::domain::mindmap::{rebuild_from_flat, FlatNode, MindmapNode};
use crate::ports::{MindmapStore, TreeRecord, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct ListMindmapsQuery {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

/// A saved tree plus its reconstructed structure.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MindmapView {
    pub tree: TreeRecord,
    pub root: Option<MindmapNode>,
}

pub struct ListMindmapsHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    mindmaps: Arc<dyn MindmapStore>,
}

impl ListMindmapsHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, mindmaps: Arc<dyn MindmapStore>) -> Self {
        Self {
            workspaces,
            mindmaps,
        }
    }

    pub async fn handle(&self, query: ListMindmapsQuery) -> Result<Vec<MindmapView>, DomainError> {
        owned_workspace(&*self.workspaces, query.workspace_id, query.user_id).await?;
        let trees = self.mindmaps.list_for_workspace(query.workspace_id).await?;

        let mut views = Vec::with_capacity(trees.len());
        for tree in trees {
            let rows = self.mindmaps.nodes(tree.id).await?;
            // Map database ids onto breadth-first positions; rows arrive
            // parents first, so positions are dense and stable.
            let index_of = |id: crate::domain::foundation::TreeNodeId| {
                rows.iter().position(|r| r.id == id)
            };
            let flat: Vec<FlatNode> = rows
                .iter()
                .map(|row| FlatNode {
                    id: index_of(row.id).unwrap_or_default(),
                    label: row.label.clone(),
                    parent: row.parent_id.and_then(index_of),
                })
                .collect();
            let root = rebuild_from_flat(&flat);
            if root.is_none() && !flat.is_empty() {
                warn!(tree_id = %tree.id, "stored tree rows do not form a tree");
            }
            views.push(MindmapView { tree, root });
        }
        Ok(views)
    }
}
