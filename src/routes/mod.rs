mod catalog;
mod health;
mod orders;
mod products;
mod users;

use axum::{Router, routing::get};

use crate::{
    AppState,
    models::{Bead, Charm, Design, Shape},
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/beads", catalog::router::<Bead>())
        .nest("/charms", catalog::router::<Charm>())
        .nest("/designs", catalog::router::<Design>())
        .nest("/shapes", catalog::router::<Shape>())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/users", users::router())
}

/// "charm" -> "Charm", for response messages.
fn title(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
