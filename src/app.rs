use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::AppConfig,
    database::{DocumentStore, InMemoryStore, PgDocumentStore},
    error::{AppError, Result},
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Postgres when `DB_URL` is configured, otherwise a process-local store.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = match config.database.url.as_deref() {
            Some(url) => {
                let store = PgDocumentStore::connect(url, &config.database).await?;
                tracing::info!("Connected to Postgres document store");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DB_URL not set, using in-memory store; data will not persist");
                Arc::new(InMemoryStore::new())
            }
        };

        Ok(Self::new(store, config.security.bcrypt_cost))
    }
}

/// Routes and state without the outer HTTP layers.
pub fn router(state: AppState) -> Router {
    routes::create_router().with_state(state)
}

pub fn build(config: &AppConfig, state: AppState) -> Result<Router> {
    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::Config(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    let app = router(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
