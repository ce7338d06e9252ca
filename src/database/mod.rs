mod connection;
mod memory;
mod postgres;

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::DocumentId;

pub use connection::{check_health, create_pool};
pub use memory::InMemoryStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Beads,
    Charms,
    Designs,
    Shapes,
    Products,
    Orders,
    Users,
}

impl Collection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Collection::Beads => "beads",
            Collection::Charms => "charms",
            Collection::Designs => "designs",
            Collection::Shapes => "shapes",
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level field equality conditions, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Map<String, Value>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, body: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| body.get(field) == Some(expected))
    }

    /// JSON object usable with Postgres `@>` containment.
    pub fn to_json(&self) -> Value {
        Value::Object(self.conditions.clone())
    }
}

/// A document as the store sees it: id plus an opaque JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: DocumentId,
    pub body: Value,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Narrow id-keyed document store shared by every handler.
///
/// Writes are last-write-wins; nothing here coordinates concurrent updates
/// to the same document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `body` under a freshly assigned id.
    async fn create(&self, collection: Collection, body: Value) -> Result<DocumentId, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<RawDocument>, StoreError>;

    /// Matching documents in insertion order.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<RawDocument>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<RawDocument>, StoreError>;

    /// Replaces the body of an existing document. Returns `false` when the
    /// document no longer exists.
    async fn save(&self, collection: Collection, document: &RawDocument)
    -> Result<bool, StoreError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_one(&self, collection: Collection, id: DocumentId) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matches_all_conditions() {
        let filter = Filter::all().eq("username", "maya").eq("role", "admin");

        assert!(filter.matches(&json!({"username": "maya", "role": "admin", "cart": []})));
        assert!(!filter.matches(&json!({"username": "maya", "role": "customer"})));
        assert!(!filter.matches(&json!({"role": "admin"})));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::all().matches(&json!({"anything": 1})));
        assert_eq!(Filter::all().to_json(), json!({}));
    }
}
