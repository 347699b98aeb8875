//! PostgreSQL implementation of DocumentStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::document::{Document, GeneratedDoc, GeneratedDocKind};
use crate::domain::foundation::{DocumentId, DomainError, GeneratedDocId, UserId, WorkspaceId};
use crate::ports::DocumentStore;

#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn document_from_row(row: &sqlx::postgres::PgRow) -> Document {
    Document {
        id: DocumentId::new(row.get("id")),
        filename: row.get("filename"),
        workspace_id: WorkspaceId::new(row.get("workspace_id")),
        uploaded_at: row.get("uploaded_at"),
    }
}

fn generated_from_row(row: &sqlx::postgres::PgRow) -> Result<GeneratedDoc, DomainError> {
    let kind: String = row.get("kind");
    let kind = kind
        .parse::<GeneratedDocKind>()
        .map_err(DomainError::database)?;
    Ok(GeneratedDoc {
        id: GeneratedDocId::new(row.get("id")),
        file_name: row.get("file_name"),
        kind,
        workspace_id: WorkspaceId::new(row.get("workspace_id")),
        user_id: UserId::new(row.get("user_id")),
    })
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(
        &self,
        filename: &str,
        workspace_id: WorkspaceId,
    ) -> Result<Document, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO documents (filename, workspace_id)
            VALUES ($1, $2)
            RETURNING id, filename, workspace_id, uploaded_at
            "#,
        )
        .bind(filename)
        .bind(workspace_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert document: {e}")))?;
        Ok(document_from_row(&row))
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DomainError> {
        let row = sqlx::query(
            "SELECT id, filename, workspace_id, uploaded_at FROM documents WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch document: {e}")))?;
        Ok(row.as_ref().map(document_from_row))
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, filename, workspace_id, uploaded_at
            FROM documents
            WHERE workspace_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(workspace_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list documents: {e}")))?;
        Ok(rows.iter().map(document_from_row).collect())
    }

    async fn delete(&self, id: DocumentId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete document: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Document", id));
        }
        Ok(())
    }

    async fn insert_generated(
        &self,
        file_name: &str,
        kind: GeneratedDocKind,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<GeneratedDoc, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO aidocs (file_name, kind, workspace_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, file_name, kind, workspace_id, user_id
            "#,
        )
        .bind(file_name)
        .bind(kind.as_str())
        .bind(workspace_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert generated doc: {e}")))?;
        generated_from_row(&row)
    }

    async fn find_generated(
        &self,
        id: GeneratedDocId,
    ) -> Result<Option<GeneratedDoc>, DomainError> {
        let row = sqlx::query(
            "SELECT id, file_name, kind, workspace_id, user_id FROM aidocs WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch generated doc: {e}")))?;
        row.as_ref().map(generated_from_row).transpose()
    }

    async fn list_generated(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<GeneratedDoc>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, file_name, kind, workspace_id, user_id
            FROM aidocs
            WHERE workspace_id = $1
            ORDER BY id
            "#,
        )
        .bind(workspace_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list generated docs: {e}")))?;
        rows.iter().map(generated_from_row).collect()
    }

    async fn delete_generated(&self, id: GeneratedDocId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM aidocs WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete generated doc: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Generated document", id));
        }
        Ok(())
    }
}
