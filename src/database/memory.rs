use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    database::{Collection, DocumentStore, Filter, RawDocument, StoreError},
    models::DocumentId,
};

/// HashMap-backed store for local development and tests.
///
/// Each collection keeps its documents in insertion order. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<RawDocument>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .map(|collections| collections.get(&collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&HashMap<Collection, Vec<RawDocument>>) -> T,
    ) -> Result<T, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;
        Ok(f(&collections))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut HashMap<Collection, Vec<RawDocument>>) -> T,
    ) -> Result<T, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;
        Ok(f(&mut collections))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create(&self, collection: Collection, body: Value) -> Result<DocumentId, StoreError> {
        let id = DocumentId::new();
        self.write(|collections| {
            collections
                .entry(collection)
                .or_default()
                .push(RawDocument { id, body });
        })?;
        Ok(id)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<RawDocument>, StoreError> {
        self.read(|collections| {
            collections
                .get(&collection)
                .and_then(|documents| documents.iter().find(|doc| doc.id == id))
                .cloned()
        })
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<RawDocument>, StoreError> {
        self.read(|collections| {
            collections
                .get(&collection)
                .map(|documents| {
                    documents
                        .iter()
                        .filter(|doc| filter.matches(&doc.body))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<RawDocument>, StoreError> {
        self.read(|collections| {
            collections
                .get(&collection)
                .and_then(|documents| documents.iter().find(|doc| filter.matches(&doc.body)))
                .cloned()
        })
    }

    async fn save(
        &self,
        collection: Collection,
        document: &RawDocument,
    ) -> Result<bool, StoreError> {
        self.write(|collections| {
            match collections
                .get_mut(&collection)
                .and_then(|documents| documents.iter_mut().find(|doc| doc.id == document.id))
            {
                Some(stored) => {
                    stored.body = document.body.clone();
                    true
                }
                None => false,
            }
        })
    }

    async fn delete_one(&self, collection: Collection, id: DocumentId) -> Result<bool, StoreError> {
        self.write(|collections| {
            let Some(documents) = collections.get_mut(&collection) else {
                return false;
            };
            let before = documents.len();
            documents.retain(|doc| doc.id != id);
            documents.len() != before
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read(|_| ())
    }

    async fn close(&self) {
        tracing::info!("In-memory store released");
    }
}
