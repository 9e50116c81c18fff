//! Town Square: HTTP API.
//!
//! Routes, shared state, header handling and error mapping. `main.rs` only
//! wires configuration, logging and the listener around [`build_router`].

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod headers;
pub mod media;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::games::router())
        .merge(routes::content::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
