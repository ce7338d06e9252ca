use chrono::Utc;

use crate::{
    database::DocumentStore,
    error::{AppError, Result},
    models::{DocumentId, Order, OrderRequest, Product, Record, User, has_text, require},
    queries::document_queries,
    services::reference_service::{self, Resolution, lookup},
};

/// Both ids checked, then every product in sequence; the first failure aborts
/// before anything is written.
async fn validate_references(
    store: &dyn DocumentStore,
    customer_id: &str,
    product_ids: &[String],
) -> Result<(Record<User>, Vec<DocumentId>)> {
    let customer = match lookup::<User>(store, Some(customer_id)).await? {
        Resolution::Valid(record) => record,
        Resolution::NotFound(id) => return Err(AppError::CustomerNotFound(id)),
        other => other.into_required("customer_id")?,
    };

    let mut resolved = Vec::with_capacity(product_ids.len());
    for raw in product_ids {
        let product = match lookup::<Product>(store, Some(raw)).await? {
            Resolution::Absent => Resolution::InvalidFormat(raw.clone()),
            other => other,
        }
        .into_required("product_ids")?;
        resolved.push(product.id);
    }

    Ok((customer, resolved))
}

fn required_fields(request: &OrderRequest) -> [(&'static str, bool); 2] {
    [
        ("customer_id", has_text(&request.customer_id)),
        (
            "product_ids",
            request.product_ids.as_ref().is_some_and(|ids| !ids.is_empty()),
        ),
    ]
}

/// The order keeps live product references; no prices are copied.
pub async fn create_order(
    store: &dyn DocumentStore,
    request: OrderRequest,
) -> Result<(Record<Order>, Record<User>)> {
    require(&required_fields(&request))?;

    let customer_id = request.customer_id.unwrap_or_default();
    let product_ids = request.product_ids.unwrap_or_default();
    let (customer, product_ids) = validate_references(store, &customer_id, &product_ids).await?;

    let order = Order {
        customer_id: customer.id,
        product_ids,
        date: Utc::now(),
    };
    let record = document_queries::insert(store, order).await?;

    tracing::info!(
        "Created order {} for customer {} with {} products",
        record.id,
        customer.id,
        record.data.product_ids.len()
    );

    Ok((record, customer))
}

/// Replaces customer and products and re-stamps the date.
pub async fn update_order(store: &dyn DocumentStore, request: OrderRequest) -> Result<Record<Order>> {
    let mut fields = vec![("id", has_text(&request.id))];
    fields.extend(required_fields(&request));
    require(&fields)?;

    let mut record =
        reference_service::load::<Order>(store, request.id.as_deref().unwrap_or_default()).await?;

    let customer_id = request.customer_id.unwrap_or_default();
    let product_ids = request.product_ids.unwrap_or_default();
    let (customer, product_ids) = validate_references(store, &customer_id, &product_ids).await?;

    record.data = Order {
        customer_id: customer.id,
        product_ids,
        date: Utc::now(),
    };
    document_queries::save(store, &record).await?;

    tracing::info!("Updated order {}", record.id);

    Ok(record)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{database::InMemoryStore, models::Document};

    async fn seed_user(store: &InMemoryStore) -> DocumentId {
        let user = User {
            username: "iris".to_string(),
            password: "hash".to_string(),
            role: "customer".to_string(),
            first_name: "Iris".to_string(),
            last_name: "Vale".to_string(),
            email: "iris@example.com".to_string(),
            cart: Vec::new(),
        };
        document_queries::insert(store, user).await.unwrap().id
    }

    async fn seed_product(store: &InMemoryStore, name: &str) -> DocumentId {
        let product = Product {
            is_template: false,
            product_type: "bracelet".to_string(),
            special_request: false,
            base_price: Decimal::new(1800, 2),
            color: "silver".to_string(),
            name: name.to_string(),
            description: "Chain".to_string(),
            img_path: "/img/chain.png".to_string(),
            charm_id: None,
            beads_id: None,
            design_id: None,
            shape_id: None,
        };
        document_queries::insert(store, product).await.unwrap().id
    }

    fn order_request(customer: DocumentId, products: &[String]) -> OrderRequest {
        OrderRequest {
            id: None,
            customer_id: Some(customer.to_string()),
            product_ids: Some(products.to_vec()),
        }
    }

    #[tokio::test]
    async fn test_create_order_keeps_product_order() {
        let store = InMemoryStore::new();
        let customer = seed_user(&store).await;
        let first = seed_product(&store, "one").await;
        let second = seed_product(&store, "two").await;

        let (order, user) = create_order(
            &store,
            order_request(customer, &[second.to_string(), first.to_string()]),
        )
        .await
        .unwrap();

        assert_eq!(order.data.customer_id, customer);
        assert_eq!(order.data.product_ids, vec![second, first]);
        assert_eq!(user.data.first_name, "Iris");
    }

    #[tokio::test]
    async fn test_malformed_product_id_persists_nothing() {
        let store = InMemoryStore::new();
        let customer = seed_user(&store).await;
        let valid = seed_product(&store, "one").await;

        let err = create_order(
            &store,
            order_request(customer, &[valid.to_string(), "not-an-id".to_string()]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidReference { kind: "product", .. }));
        assert_eq!(store.count(Order::COLLECTION), 0);
    }

    #[tokio::test]
    async fn test_blank_product_id_is_invalid() {
        let store = InMemoryStore::new();
        let customer = seed_user(&store).await;

        let err = create_order(&store, order_request(customer, &["".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { kind: "product", .. }));
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, "one").await;

        let err = create_order(
            &store,
            order_request(DocumentId::new(), &[product.to_string()]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::CustomerNotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_product_list_is_missing() {
        let store = InMemoryStore::new();
        let customer = seed_user(&store).await;

        let err = create_order(&store, order_request(customer, &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref f) if f == &vec!["product_ids"]));
    }

    #[tokio::test]
    async fn test_update_with_unknown_product_leaves_order_untouched() {
        let store = InMemoryStore::new();
        let customer = seed_user(&store).await;
        let product = seed_product(&store, "one").await;
        let (order, _) = create_order(&store, order_request(customer, &[product.to_string()]))
            .await
            .unwrap();

        let mut request = order_request(
            customer,
            &[product.to_string(), DocumentId::new().to_string()],
        );
        request.id = Some(order.id.to_string());
        let err = update_order(&store, request).await.unwrap_err();
        assert!(matches!(err, AppError::ReferenceNotFound { kind: "product", .. }));

        let stored = document_queries::find_by_id::<Order>(&store, order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.data, order.data);
    }

    #[tokio::test]
    async fn test_update_restamps_date() {
        let store = InMemoryStore::new();
        let customer = seed_user(&store).await;
        let product = seed_product(&store, "one").await;
        let extra = seed_product(&store, "two").await;
        let (order, _) = create_order(&store, order_request(customer, &[product.to_string()]))
            .await
            .unwrap();

        let mut request = order_request(customer, &[extra.to_string()]);
        request.id = Some(order.id.to_string());
        let updated = update_order(&store, request).await.unwrap();

        assert_eq!(updated.data.product_ids, vec![extra]);
        assert!(updated.data.date >= order.data.date);
    }
}
