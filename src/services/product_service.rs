use crate::{
    database::DocumentStore,
    error::Result,
    models::{
        Bead, Charm, Design, DocumentId, Product, ProductRequest, Record, RefUpdate, Shape,
        has_text, require,
    },
    queries::document_queries,
    services::reference_service::{self, resolve_optional, resolve_update},
};

struct ProductRefs<R> {
    charm_id: R,
    beads_id: R,
    design_id: R,
    shape_id: R,
}

impl ProductRefs<RefUpdate<DocumentId>> {
    fn merge_into(&self, current: &Product) -> ProductRefs<Option<DocumentId>> {
        ProductRefs {
            charm_id: self.charm_id.apply(current.charm_id),
            beads_id: self.beads_id.apply(current.beads_id),
            design_id: self.design_id.apply(current.design_id),
            shape_id: self.shape_id.apply(current.shape_id),
        }
    }
}

/// Callers have already run the presence check on `request`.
fn build_product(request: ProductRequest, refs: ProductRefs<Option<DocumentId>>) -> Product {
    Product {
        is_template: request.is_template.unwrap_or_default(),
        product_type: request.product_type.unwrap_or_default(),
        special_request: request.special_request.unwrap_or_default(),
        base_price: request.base_price.unwrap_or_default(),
        color: request.color.unwrap_or_default(),
        name: request.name.unwrap_or_default(),
        description: request.description.unwrap_or_default(),
        img_path: request.img_path.unwrap_or_default(),
        charm_id: refs.charm_id,
        beads_id: refs.beads_id,
        design_id: refs.design_id,
        shape_id: refs.shape_id,
    }
}

/// Absent references are stored as null.
pub async fn create_product(
    store: &dyn DocumentStore,
    request: ProductRequest,
) -> Result<Record<Product>> {
    require(&request.required_fields())?;

    let refs = ProductRefs {
        charm_id: resolve_optional::<Charm>(store, request.charm_id.as_deref()).await?,
        beads_id: resolve_optional::<Bead>(store, request.beads_id.as_deref()).await?,
        design_id: resolve_optional::<Design>(store, request.design_id.as_deref()).await?,
        shape_id: resolve_optional::<Shape>(store, request.shape_id.as_deref()).await?,
    };

    let record = document_queries::insert(store, build_product(request, refs)).await?;

    tracing::info!("Created product {}", record.id);

    Ok(record)
}

/// Scalars are replaced wholesale. Each optional reference is left alone when
/// omitted, nulled by the clearing token, or re-pointed after validation.
/// Every check runs before anything is written.
pub async fn update_product(
    store: &dyn DocumentStore,
    request: ProductRequest,
) -> Result<Record<Product>> {
    let mut fields = vec![("id", has_text(&request.id))];
    fields.extend(request.required_fields());
    require(&fields)?;

    let product_id =
        reference_service::parse_id::<Product>(request.id.as_deref().unwrap_or_default())?;

    let updates = ProductRefs {
        charm_id: resolve_update::<Charm>(store, wire(&request.charm_id)).await?,
        beads_id: resolve_update::<Bead>(store, wire(&request.beads_id)).await?,
        design_id: resolve_update::<Design>(store, wire(&request.design_id)).await?,
        shape_id: resolve_update::<Shape>(store, wire(&request.shape_id)).await?,
    };

    let mut record = reference_service::load_by_id::<Product>(store, product_id).await?;
    let refs = updates.merge_into(&record.data);
    record.data = build_product(request, refs);

    document_queries::save(store, &record).await?;

    tracing::info!("Updated product {}", record.id);

    Ok(record)
}

fn wire(raw: &Option<String>) -> RefUpdate {
    RefUpdate::from_wire(raw.as_deref())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{database::InMemoryStore, error::AppError, models::Document};

    fn product_request() -> ProductRequest {
        ProductRequest {
            id: None,
            is_template: Some(true),
            product_type: Some("bracelet".to_string()),
            special_request: Some(false),
            base_price: Some(Decimal::new(2500, 2)),
            color: Some("gold".to_string()),
            name: Some("Sunrise".to_string()),
            description: Some("Gold bracelet".to_string()),
            img_path: Some("/img/sunrise.png".to_string()),
            ..Default::default()
        }
    }

    async fn seed_charm(store: &InMemoryStore) -> DocumentId {
        let charm = Charm {
            name: "Anchor".to_string(),
            price: Decimal::new(300, 2),
            description: "Steel anchor".to_string(),
            img_path: "/img/anchor.png".to_string(),
        };
        document_queries::insert(store, charm).await.unwrap().id
    }

    async fn seed_bead(store: &InMemoryStore) -> DocumentId {
        let bead = Bead {
            name: "Pearl".to_string(),
            color: "white".to_string(),
            description: "Freshwater".to_string(),
            img_path: "/img/pearl.png".to_string(),
        };
        document_queries::insert(store, bead).await.unwrap().id
    }

    #[tokio::test]
    async fn test_create_without_references_stores_null() {
        let store = InMemoryStore::new();
        let record = create_product(&store, product_request()).await.unwrap();

        assert_eq!(record.data.charm_id, None);
        assert_eq!(record.data.beads_id, None);

        let raw = store
            .find_by_id(Product::COLLECTION, record.id)
            .await
            .unwrap()
            .unwrap();
        assert!(raw.body["charm_id"].is_null());
        assert!(raw.body["shape_id"].is_null());
    }

    #[tokio::test]
    async fn test_create_false_flags_count_as_present() {
        let store = InMemoryStore::new();
        let mut request = product_request();
        request.is_template = Some(false);
        request.base_price = Some(Decimal::ZERO);

        let record = create_product(&store, request).await.unwrap();
        assert!(!record.data.is_template);
    }

    #[tokio::test]
    async fn test_create_reports_missing_fields() {
        let store = InMemoryStore::new();
        let mut request = product_request();
        request.color = None;
        request.special_request = None;

        let err = create_product(&store, request).await.unwrap_err();
        assert!(
            matches!(err, AppError::MissingField(ref f) if f == &vec!["special_request", "color"])
        );
    }

    #[tokio::test]
    async fn test_create_with_unknown_charm_persists_nothing() {
        let store = InMemoryStore::new();
        let mut request = product_request();
        request.charm_id = Some(DocumentId::new().to_string());

        let err = create_product(&store, request).await.unwrap_err();
        assert!(matches!(err, AppError::ReferenceNotFound { kind: "charm", .. }));
        assert_eq!(store.count(Product::COLLECTION), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_clear_token() {
        let store = InMemoryStore::new();
        let mut request = product_request();
        request.design_id = Some("remove".to_string());

        let err = create_product(&store, request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { kind: "design", .. }));
    }

    #[tokio::test]
    async fn test_update_omitted_reference_is_preserved() {
        let store = InMemoryStore::new();
        let charm = seed_charm(&store).await;
        let mut request = product_request();
        request.charm_id = Some(charm.to_string());
        let created = create_product(&store, request).await.unwrap();

        let mut update = product_request();
        update.id = Some(created.id.to_string());
        update.name = Some("Sunset".to_string());
        let updated = update_product(&store, update).await.unwrap();

        assert_eq!(updated.data.charm_id, Some(charm));
        assert_eq!(updated.data.name, "Sunset");
    }

    #[tokio::test]
    async fn test_update_clear_token_nulls_reference() {
        let store = InMemoryStore::new();
        let charm = seed_charm(&store).await;
        let bead = seed_bead(&store).await;
        let mut request = product_request();
        request.charm_id = Some(charm.to_string());
        request.beads_id = Some(bead.to_string());
        let created = create_product(&store, request).await.unwrap();

        let mut update = product_request();
        update.id = Some(created.id.to_string());
        update.charm_id = Some("remove".to_string());
        let updated = update_product(&store, update).await.unwrap();

        assert_eq!(updated.data.charm_id, None);
        assert_eq!(updated.data.beads_id, Some(bead));
    }

    #[tokio::test]
    async fn test_update_clear_token_on_null_reference_stays_null() {
        let store = InMemoryStore::new();
        let created = create_product(&store, product_request()).await.unwrap();

        let mut update = product_request();
        update.id = Some(created.id.to_string());
        update.charm_id = Some("remove".to_string());
        let updated = update_product(&store, update).await.unwrap();

        assert_eq!(updated.data.charm_id, None);
    }

    #[tokio::test]
    async fn test_update_with_bad_reference_writes_nothing() {
        let store = InMemoryStore::new();
        let created = create_product(&store, product_request()).await.unwrap();

        let mut update = product_request();
        update.id = Some(created.id.to_string());
        update.name = Some("Changed".to_string());
        update.shape_id = Some(DocumentId::new().to_string());
        let err = update_product(&store, update).await.unwrap_err();
        assert!(matches!(err, AppError::ReferenceNotFound { kind: "shape", .. }));

        let stored = document_queries::find_by_id::<Product>(&store, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.data.name, "Sunrise");
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found() {
        let store = InMemoryStore::new();
        let mut update = product_request();
        update.id = Some(DocumentId::new().to_string());

        let err = update_product(&store, update).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
