//! Postboard
//!
//! Question and article posts stored in a document store, with images kept in a blob
//! store. The `composer` and `browser` modules hold the screen logic; `service` is the
//! only way they reach storage.

pub mod api;
pub mod blob;
pub mod browser;
pub mod composer;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use blob::BLOB_ROUTE;
use config::Config;
use service::PostService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn PostService>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Images have no size limit
        .route(
            "/posts",
            post(api::create_post).layer(DefaultBodyLimit::disable()),
        )
        .route("/posts/{id}", delete(api::delete_post))
        .route("/questions", get(api::list_questions));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .nest_service(
            &format!("/{}", BLOB_ROUTE),
            ServeDir::new(&state.config.blob_dir),
        )
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
