//! PostgreSQL implementation of MindmapStore.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, TreeId, TreeNodeId, UserId, WorkspaceId};
use crate::domain::mindmap::FlatNode;
use crate::ports::{MindmapStore, TreeNodeRecord, TreeRecord};

#[derive(Clone)]
pub struct PostgresMindmapStore {
    pool: PgPool,
}

impl PostgresMindmapStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn tree_from_row(row: &sqlx::postgres::PgRow) -> TreeRecord {
    TreeRecord {
        id: TreeId::new(row.get("id")),
        name: row.get("name"),
        description: row.get("description"),
        user_id: UserId::new(row.get("user_id")),
        workspace_id: WorkspaceId::new(row.get("workspace_id")),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl MindmapStore for PostgresMindmapStore {
    async fn insert_tree(
        &self,
        name: &str,
        description: Option<&str>,
        user_id: UserId,
        workspace_id: WorkspaceId,
        nodes: &[FlatNode],
    ) -> Result<TreeRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("failed to start transaction: {e}")))?;

        let row = sqlx::query(
            r#"
            INSERT INTO trees (name, description, user_id, workspace_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, user_id, workspace_id, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(user_id.as_i64())
        .bind(workspace_id.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert tree: {e}")))?;
        let tree = tree_from_row(&row);

        // Rows arrive breadth-first, so a node's parent has always been
        // inserted (and mapped to its database id) before the node itself.
        let mut id_map: HashMap<usize, i64> = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let parent_db_id = match node.parent {
                Some(parent) => Some(*id_map.get(&parent).ok_or_else(|| {
                    DomainError::database(format!(
                        "node {} references unknown parent {parent}",
                        node.id
                    ))
                })?),
                None => None,
            };
            let node_row = sqlx::query(
                r#"
                INSERT INTO tree_nodes (label, parent_id, tree_id)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(&node.label)
            .bind(parent_db_id)
            .bind(tree.id.as_i64())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("failed to insert tree node: {e}")))?;
            id_map.insert(node.id, node_row.get("id"));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("failed to commit tree: {e}")))?;
        Ok(tree)
    }

    async fn find_tree(&self, id: TreeId) -> Result<Option<TreeRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, user_id, workspace_id, created_at
            FROM trees WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch tree: {e}")))?;
        Ok(row.as_ref().map(tree_from_row))
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<TreeRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, user_id, workspace_id, created_at
            FROM trees
            WHERE workspace_id = $1
            ORDER BY id
            "#,
        )
        .bind(workspace_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list trees: {e}")))?;
        Ok(rows.iter().map(tree_from_row).collect())
    }

    async fn nodes(&self, tree_id: TreeId) -> Result<Vec<TreeNodeRecord>, DomainError> {
        // Insertion order is breadth-first, so ordering by id keeps parents
        // ahead of their children.
        let rows = sqlx::query(
            "SELECT id, label, parent_id, tree_id FROM tree_nodes WHERE tree_id = $1 ORDER BY id",
        )
        .bind(tree_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch tree nodes: {e}")))?;
        Ok(rows
            .iter()
            .map(|row| {
                let parent_id: Option<i64> = row.get("parent_id");
                TreeNodeRecord {
                    id: TreeNodeId::new(row.get("id")),
                    label: row.get("label"),
                    parent_id: parent_id.map(TreeNodeId::new),
                    tree_id: TreeId::new(row.get("tree_id")),
                }
            })
            .collect())
    }

    async fn delete_tree(&self, id: TreeId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM trees WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete tree: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Tree", id));
        }
        Ok(())
    }
}
