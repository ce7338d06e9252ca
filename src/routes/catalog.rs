use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    error::Result,
    models::{CatalogItem, DeleteRequest, MessageResponse, Record},
    routes::title,
    services::{catalog_service, document_service},
};

/// Beads, charms, designs and shapes all expose the same five endpoints.
pub fn router<T: CatalogItem>() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_items::<T>)
                .post(create_item::<T>)
                .patch(update_item::<T>)
                .delete(delete_item::<T>),
        )
        .route("/{id}", get(get_item::<T>))
}

async fn list_items<T: CatalogItem>(State(state): State<AppState>) -> Result<Json<Vec<Record<T>>>> {
    let items = document_service::list::<T>(state.store.as_ref()).await?;

    Ok(Json(items))
}

async fn get_item<T: CatalogItem>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<T>>> {
    let item = document_service::get::<T>(state.store.as_ref(), &id).await?;

    Ok(Json(item))
}

async fn create_item<T: CatalogItem>(
    State(state): State<AppState>,
    Json(payload): Json<T::Request>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let item = catalog_service::create::<T>(state.store.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "{} {} created successfully",
            title(T::KIND),
            item.data.name()
        ))),
    ))
}

async fn update_item<T: CatalogItem>(
    State(state): State<AppState>,
    Json(payload): Json<T::Request>,
) -> Result<Json<MessageResponse>> {
    let item = catalog_service::update::<T>(state.store.as_ref(), payload).await?;

    Ok(Json(MessageResponse::new(format!(
        "{} {} updated successfully",
        title(T::KIND),
        item.data.name()
    ))))
}

async fn delete_item<T: CatalogItem>(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<MessageResponse>> {
    let item = document_service::delete::<T>(state.store.as_ref(), payload.id.as_deref()).await?;

    Ok(Json(MessageResponse::new(format!(
        "{} {} deleted successfully",
        title(T::KIND),
        item.data.name()
    ))))
}
