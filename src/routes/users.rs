use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    error::Result,
    models::{CartRequest, DeleteRequest, MessageResponse, User, UserRequest, UserResponse},
    services::{document_service, user_service},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_users)
                .post(create_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/{id}", get(get_user).patch(update_user_cart))
}

pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = document_service::list::<User>(state.store.as_ref()).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = document_service::get::<User>(state.store.as_ref(), &id).await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let user = user_service::create_user(state.store.as_ref(), payload, state.bcrypt_cost).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "User {} created successfully",
            user.data.username
        ))),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    Json(payload): Json<UserRequest>,
) -> Result<Json<MessageResponse>> {
    let user = user_service::update_user(state.store.as_ref(), payload, state.bcrypt_cost).await?;

    Ok(Json(MessageResponse::new(format!(
        "User {} updated successfully",
        user.data.username
    ))))
}

pub async fn update_user_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CartRequest>,
) -> Result<Json<MessageResponse>> {
    let user = user_service::update_cart(state.store.as_ref(), &id, payload).await?;

    Ok(Json(MessageResponse::new(format!(
        "User {} updated successfully",
        user.data.username
    ))))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<MessageResponse>> {
    document_service::delete::<User>(state.store.as_ref(), payload.id.as_deref()).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
