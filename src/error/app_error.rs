use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{database::StoreError, models::DocumentId};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please fill in all fields: {}", .0.join(", "))]
    MissingField(Vec<&'static str>),

    #[error("Invalid {kind} id: {value}")]
    InvalidReference { kind: &'static str, value: String },

    #[error("No {kind} with id {id} found in DB")]
    ReferenceNotFound { kind: &'static str, id: DocumentId },

    #[error("Customer id {0} not found in DB")]
    CustomerNotFound(DocumentId),

    #[error("{0}")]
    NotFound(String),

    #[error("Username {0} already exists in DB")]
    DuplicateUsername(String),

    #[error("Product with id {0} already exists in user's cart")]
    DuplicateCartItem(DocumentId),

    #[error("Product with id {0} does not exist in user's cart")]
    CartItemNotFound(DocumentId),

    #[error("Invalid action {0:?}; must be either \"add\" or \"remove\"")]
    InvalidAction(String),

    #[error("{0}")]
    PersistenceFailure(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidReference { .. } | Self::InvalidAction(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ReferenceNotFound { .. } | Self::CustomerNotFound(_) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::DuplicateUsername(_) | Self::DuplicateCartItem(_) | Self::CartItemNotFound(_) => {
                StatusCode::CONFLICT
            }
            Self::PersistenceFailure(_) | Self::Store(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::PersistenceFailure(ref msg) => {
                tracing::error!("Persistence failure: {}", msg);
                msg.clone()
            }
            AppError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Config(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Server configuration error".to_string()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
