//! CreateMindmapHandler - expands a topic and persists the resulting tree.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::owned_workspace;
use crate::application::mindmap::MindmapGenerator;
use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::mindmap::{flatten_bfs, MindmapNode};
use crate::ports::{MindmapStore, TreeRecord, WorkspaceStore};

use super::MindmapHandlerError;

const MAX_DEPTH: u32 = 5;
const DEFAULT_DEPTH: u32 = 2;

#[derive(Debug, Clone)]
pub struct CreateMindmapCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub topic: String,
    pub description: Option<String>,
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CreateMindmapResult {
    pub tree: TreeRecord,
    pub root: MindmapNode,
}

pub struct CreateMindmapHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    mindmaps: Arc<dyn MindmapStore>,
    generator: Arc<MindmapGenerator>,
}

impl CreateMindmapHandler {
    pub fn new(
        workspaces: Arc<dyn WorkspaceStore>,
        mindmaps: Arc<dyn MindmapStore>,
        generator: Arc<MindmapGenerator>,
    ) -> Self {
        Self {
            workspaces,
            mindmaps,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateMindmapCommand,
    ) -> Result<CreateMindmapResult, MindmapHandlerError> {
        let topic = cmd.topic.trim();
        if topic.is_empty() {
            return Err(MindmapHandlerError::Validation("topic must not be empty".into()));
        }
        let depth = cmd.depth.unwrap_or(DEFAULT_DEPTH);
        if depth > MAX_DEPTH {
            return Err(MindmapHandlerError::Validation(format!(
                "depth must be at most {MAX_DEPTH}"
            )));
        }
        owned_workspace(&*self.workspaces, cmd.workspace_id, cmd.user_id).await?;

        let mindmap = self.generator.generate(topic, depth).await?;
        if mindmap.is_empty() {
            return Err(MindmapHandlerError::EmptyGeneration);
        }

        let nodes = flatten_bfs(&mindmap.root);
        let tree = self
            .mindmaps
            .insert_tree(
                topic,
                cmd.description.as_deref(),
                cmd.user_id,
                cmd.workspace_id,
                &nodes,
            )
            .await?;
        info!(tree_id = %tree.id, nodes = nodes.len(), "mindmap created");

        Ok(CreateMindmapResult {
            tree,
            root: mindmap.root,
        })
    }
}
