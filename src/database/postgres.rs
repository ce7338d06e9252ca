use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::{
    config::DatabaseConfig,
    database::{Collection, DocumentStore, Filter, RawDocument, StoreError, check_health, create_pool},
    models::DocumentId,
};

/// All collections live in one `documents` table keyed by `(collection, id)`
/// with the document body in a JSONB column.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Value>,
}

impl From<DocumentRow> for RawDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: DocumentId::from(row.id),
            body: row.body.0,
        }
    }
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        Ok(Self::new(create_pool(url, config).await?))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: Collection, body: Value) -> Result<DocumentId, StoreError> {
        let id = DocumentId::new();

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(id.as_uuid())
            .bind(Json(&body))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<RawDocument>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RawDocument::from))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<RawDocument>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents
             WHERE collection = $1 AND body @> $2
             ORDER BY created_at ASC, id ASC",
        )
        .bind(collection.as_str())
        .bind(Json(filter.to_json()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RawDocument::from).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<RawDocument>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents
             WHERE collection = $1 AND body @> $2
             ORDER BY created_at ASC, id ASC
             LIMIT 1",
        )
        .bind(collection.as_str())
        .bind(Json(filter.to_json()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RawDocument::from))
    }

    async fn save(
        &self,
        collection: Collection,
        document: &RawDocument,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET body = $3, updated_at = NOW()
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(document.id.as_uuid())
        .bind(Json(&document.body))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(&self, collection: Collection, id: DocumentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        check_health(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
