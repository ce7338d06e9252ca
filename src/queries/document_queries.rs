use serde_json::Value;

use crate::{
    database::{DocumentStore, Filter, RawDocument, StoreError},
    error::{AppError, Result},
    models::{Document, DocumentId, Record},
};

fn decode<T: Document>(raw: RawDocument) -> Result<Record<T>> {
    let data = serde_json::from_value(raw.body).map_err(StoreError::from)?;
    Ok(Record::new(raw.id, data))
}

fn encode<T: Document>(data: &T) -> Result<Value> {
    Ok(serde_json::to_value(data).map_err(StoreError::from)?)
}

pub async fn find_all<T: Document>(store: &dyn DocumentStore) -> Result<Vec<Record<T>>> {
    store
        .find(T::COLLECTION, &Filter::all())
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

pub async fn find_by_id<T: Document>(
    store: &dyn DocumentStore,
    id: DocumentId,
) -> Result<Option<Record<T>>> {
    store
        .find_by_id(T::COLLECTION, id)
        .await?
        .map(decode)
        .transpose()
}

pub async fn find_one_by<T: Document>(
    store: &dyn DocumentStore,
    field: &str,
    value: impl Into<Value>,
) -> Result<Option<Record<T>>> {
    let filter = Filter::all().eq(field, value);
    store
        .find_one(T::COLLECTION, &filter)
        .await?
        .map(decode)
        .transpose()
}

pub async fn insert<T: Document>(store: &dyn DocumentStore, data: T) -> Result<Record<T>> {
    let id = store.create(T::COLLECTION, encode(&data)?).await?;
    Ok(Record::new(id, data))
}

/// Writes the whole document back. A document deleted since it was read
/// surfaces as [`AppError::PersistenceFailure`].
pub async fn save<T: Document>(store: &dyn DocumentStore, record: &Record<T>) -> Result<()> {
    let raw = RawDocument {
        id: record.id,
        body: encode(&record.data)?,
    };

    if store.save(T::COLLECTION, &raw).await? {
        Ok(())
    } else {
        Err(AppError::PersistenceFailure(format!(
            "Error: {} {} could not be updated",
            T::KIND,
            record.id
        )))
    }
}

pub async fn delete<T: Document>(store: &dyn DocumentStore, id: DocumentId) -> Result<()> {
    if store.delete_one(T::COLLECTION, id).await? {
        Ok(())
    } else {
        Err(AppError::PersistenceFailure(format!(
            "Error: {} {} could not be deleted",
            T::KIND,
            id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::InMemoryStore,
        models::{Design, User},
    };

    fn design(name: &str) -> Design {
        Design {
            name: name.to_string(),
            description: "Braided".to_string(),
            img_path: "/img/braid.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = InMemoryStore::new();
        let record = insert(&store, design("Fishtail")).await.unwrap();

        let found = find_by_id::<Design>(&store, record.id).await.unwrap();
        assert_eq!(found, Some(record));

        let all = find_all::<Design>(&store).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_save_after_delete_is_a_persistence_failure() {
        let store = InMemoryStore::new();
        let record = insert(&store, design("Chevron")).await.unwrap();
        delete::<Design>(&store, record.id).await.unwrap();

        let err = save(&store, &record).await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceFailure(_)));

        let err = delete::<Design>(&store, record.id).await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceFailure(_)));
    }

    #[tokio::test]
    async fn test_find_one_by_field() {
        let store = InMemoryStore::new();
        let user = User {
            username: "lena".to_string(),
            password: "hash".to_string(),
            role: "customer".to_string(),
            first_name: "Lena".to_string(),
            last_name: "Park".to_string(),
            email: "lena@example.com".to_string(),
            cart: Vec::new(),
        };
        let record = insert(&store, user).await.unwrap();

        let found = find_one_by::<User>(&store, "username", "lena").await.unwrap();
        assert_eq!(found.map(|r| r.id), Some(record.id));

        let missing = find_one_by::<User>(&store, "username", "nobody").await.unwrap();
        assert!(missing.is_none());
    }
}
