use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    error::Result,
    models::{DeleteRequest, MessageResponse, Order, OrderRequest, Record},
    services::{document_service, order_service},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_orders)
                .post(create_order)
                .patch(update_order)
                .delete(delete_order),
        )
        .route("/{id}", get(get_order))
}

pub async fn get_orders(State(state): State<AppState>) -> Result<Json<Vec<Record<Order>>>> {
    let orders = document_service::list::<Order>(state.store.as_ref()).await?;

    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<Order>>> {
    let order = document_service::get::<Order>(state.store.as_ref(), &id).await?;

    Ok(Json(order))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let (_order, customer) = order_service::create_order(state.store.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "Order for {} {} handled successfully",
            customer.data.first_name, customer.data.last_name
        ))),
    ))
}

pub async fn update_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderRequest>,
) -> Result<Json<MessageResponse>> {
    let order = order_service::update_order(state.store.as_ref(), payload).await?;

    Ok(Json(MessageResponse::new(format!(
        "Order id {} updated successfully",
        order.id
    ))))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<MessageResponse>> {
    let order =
        document_service::delete::<Order>(state.store.as_ref(), payload.id.as_deref()).await?;

    Ok(Json(MessageResponse::new(format!(
        "Order id {} deleted successfully",
        order.id
    ))))
}
