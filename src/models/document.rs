use serde::{Serialize, de::DeserializeOwned};

use crate::{database::Collection, models::DocumentId};

/// A type persisted as one document in a [`Collection`].
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    /// Singular name used in client-facing messages ("charm", "product").
    const KIND: &'static str;
}

/// A stored document together with its id, served as `{ "id": ..., ...fields }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<T> {
    pub id: DocumentId,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(id: DocumentId, data: T) -> Self {
        Self { id, data }
    }
}
