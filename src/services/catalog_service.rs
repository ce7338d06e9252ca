use crate::{
    database::DocumentStore,
    error::Result,
    models::{CatalogItem, Record, has_text, require},
    queries::document_queries,
    services::reference_service,
};

pub async fn create<T: CatalogItem>(
    store: &dyn DocumentStore,
    request: T::Request,
) -> Result<Record<T>> {
    let item = T::from_request(request)?;
    let record = document_queries::insert(store, item).await?;

    tracing::info!("Created {} {}", T::KIND, record.id);

    Ok(record)
}

/// Full replace of every field.
pub async fn update<T: CatalogItem>(
    store: &dyn DocumentStore,
    request: T::Request,
) -> Result<Record<T>> {
    let id = T::request_id(&request).map(str::to_string);
    require(&[("id", has_text(&id))])?;
    let id = id.unwrap_or_default();

    let item = T::from_request(request)?;
    let mut record = reference_service::load::<T>(store, &id).await?;
    record.data = item;

    document_queries::save(store, &record).await?;

    tracing::info!("Updated {} {}", T::KIND, record.id);

    Ok(record)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        database::InMemoryStore,
        error::AppError,
        models::{Bead, BeadRequest, Charm, CharmRequest, Document},
        services::document_service::{delete, get, list},
    };

    fn charm_request(name: &str) -> CharmRequest {
        CharmRequest {
            id: None,
            name: Some(name.to_string()),
            price: Some(Decimal::new(450, 2)),
            description: Some("Sterling silver".to_string()),
            img_path: Some(format!("/img/{name}.png")),
        }
    }

    #[tokio::test]
    async fn test_list_empty_collection_is_not_found() {
        let store = InMemoryStore::new();
        let err = list::<Bead>(&store).await.unwrap_err();
        assert_eq!(err.to_string(), "No beads found in DB");
    }

    #[tokio::test]
    async fn test_create_update_delete_charm() {
        let store = InMemoryStore::new();
        let created = create::<Charm>(&store, charm_request("star")).await.unwrap();

        let mut request = charm_request("comet");
        request.id = Some(created.id.to_string());
        request.price = Some(Decimal::new(600, 2));
        let updated = update::<Charm>(&store, request).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.data.name, "comet");

        let fetched = get::<Charm>(&store, &created.id.to_string()).await.unwrap();
        assert_eq!(fetched.data.price, Decimal::new(600, 2));

        let deleted = delete::<Charm>(&store, Some(&created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(deleted.data.name, "comet");
        assert!(list::<Charm>(&store).await.is_err());
    }

    #[tokio::test]
    async fn test_update_requires_id_and_existing_document() {
        let store = InMemoryStore::new();

        let err = update::<Charm>(&store, charm_request("sun")).await.unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref f) if f == &vec!["id"]));

        let mut request = charm_request("sun");
        request.id = Some(crate::models::DocumentId::new().to_string());
        let err = update::<Charm>(&store, request).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_bead() {
        let store = InMemoryStore::new();
        let request = BeadRequest {
            name: Some("Amber".to_string()),
            ..Default::default()
        };

        let err = create::<Bead>(&store, request).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all fields: color, description, img_path"
        );
        assert_eq!(store.count(Bead::COLLECTION), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let store = InMemoryStore::new();
        let err = delete::<Bead>(&store, None).await.unwrap_err();
        assert!(matches!(err, AppError::MissingField(_)));
    }
}
