use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    error::Result,
    models::{DeleteRequest, MessageResponse, Product, ProductRequest, Record},
    services::{document_service, product_service},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_products)
                .post(create_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .route("/{id}", get(get_product))
}

pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<Record<Product>>>> {
    let products = document_service::list::<Product>(state.store.as_ref()).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<Product>>> {
    let product = document_service::get::<Product>(state.store.as_ref(), &id).await?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let product = product_service::create_product(state.store.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "Product {} created successfully",
            product.data.name
        ))),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<MessageResponse>> {
    let product = product_service::update_product(state.store.as_ref(), payload).await?;

    Ok(Json(MessageResponse::new(format!(
        "Product {} updated successfully",
        product.data.name
    ))))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<MessageResponse>> {
    let product =
        document_service::delete::<Product>(state.store.as_ref(), payload.id.as_deref()).await?;

    Ok(Json(MessageResponse::new(format!(
        "Product {} deleted successfully",
        product.data.name
    ))))
}
