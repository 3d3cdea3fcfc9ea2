use axum::{Router, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

pub mod admin;
pub mod cart;
pub mod doc;
pub mod health;
pub mod params;
pub mod pricing;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/carts", cart::router())
        .nest("/pricing", pricing::router())
        .nest("/admin", admin::router())
}

/// Health, API and docs with state bound. Middleware layers are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::NotFound
}
