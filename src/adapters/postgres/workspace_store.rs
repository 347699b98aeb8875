//! PostgreSQL implementation of WorkspaceStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::domain::workspace::Workspace;
use crate::ports::WorkspaceStore;

#[derive(Clone)]
pub struct PostgresWorkspaceStore {
    pool: PgPool,
}

impl PostgresWorkspaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn workspace_from_row(row: &sqlx::postgres::PgRow) -> Workspace {
    Workspace {
        id: WorkspaceId::new(row.get("id")),
        name: row.get("name"),
        user_id: UserId::new(row.get("user_id")),
    }
}

#[async_trait]
impl WorkspaceStore for PostgresWorkspaceStore {
    async fn insert(&self, name: &str, user_id: UserId) -> Result<Workspace, DomainError> {
        let row = sqlx::query(
            "INSERT INTO workspaces (name, user_id) VALUES ($1, $2) RETURNING id, name, user_id",
        )
        .bind(name)
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert workspace: {e}")))?;
        Ok(workspace_from_row(&row))
    }

    async fn find_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, DomainError> {
        let row = sqlx::query("SELECT id, name, user_id FROM workspaces WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to fetch workspace: {e}")))?;
        Ok(row.as_ref().map(workspace_from_row))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Workspace>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, user_id FROM workspaces WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list workspaces: {e}")))?;
        Ok(rows.iter().map(workspace_from_row).collect())
    }

    async fn rename(&self, id: WorkspaceId, name: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE workspaces SET name = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to rename workspace: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Workspace", id));
        }
        Ok(())
    }

    async fn delete(&self, id: WorkspaceId) -> Result<(), DomainError> {
        // Dependent rows go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete workspace: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Workspace", id));
        }
        Ok(())
    }
}
