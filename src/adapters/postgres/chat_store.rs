//! PostgreSQL implementation of ChatStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::foundation::{ChatMessageId, DomainError, UserId, WorkspaceId};
use crate::ports::ChatStore;

#[derive(Clone)]
pub struct PostgresChatStore {
    pool: PgPool,
}

impl PostgresChatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn message_from_row(row: &sqlx::postgres::PgRow) -> Result<ChatMessage, DomainError> {
    let role: String = row.get("role");
    let role = role
        .parse::<ChatRole>()
        .map_err(DomainError::database)?;
    Ok(ChatMessage {
        id: ChatMessageId::new(row.get("id")),
        role,
        content: row.get("content"),
        workspace_id: WorkspaceId::new(row.get("workspace_id")),
        user_id: UserId::new(row.get("user_id")),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl ChatStore for PostgresChatStore {
    async fn insert(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO chat_messages (workspace_id, user_id, role, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, role, content, workspace_id, user_id, created_at
            "#,
        )
        .bind(workspace_id.as_i64())
        .bind(user_id.as_i64())
        .bind(role.as_str())
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert chat message: {e}")))?;
        message_from_row(&row)
    }

    async fn history(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, role, content, workspace_id, user_id, created_at
            FROM chat_messages
            WHERE workspace_id = $1 AND user_id = $2
            ORDER BY id ASC
            "#,
        )
        .bind(workspace_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch chat history: {e}")))?;
        rows.iter().map(message_from_row).collect()
    }

    async fn recent(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        // Newest rows first, then flipped so the caller sees oldest first.
        let rows = sqlx::query(
            r#"
            SELECT id, role, content, workspace_id, user_id, created_at
            FROM chat_messages
            WHERE workspace_id = $1 AND user_id = $2
            ORDER BY id DESC
            LIMIT $3
            "#,
        )
        .bind(workspace_id.as_i64())
        .bind(user_id.as_i64())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch recent messages: {e}")))?;
        let mut messages: Vec<ChatMessage> = rows
            .iter()
            .map(message_from_row)
            .collect::<Result<_, _>>()?;
        messages.reverse();
        Ok(messages)
    }

    async fn clear(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE workspace_id = $1 AND user_id = $2")
            .bind(workspace_id.as_i64())
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to clear chat history: {e}")))?;
        Ok(result.rows_affected())
    }
}
