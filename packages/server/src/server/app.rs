//! Application setup and server configuration.

use std::sync::Arc;

use axum::{extract::Extension, middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::cors_middleware;
use crate::server::routes::{analyze_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// `GET /health` is the only dedicated route. Every other method and path
/// falls through to the analysis endpoint, which enforces `POST` itself so
/// the 405 carries the standard envelope.
pub fn build_app(deps: ServerDeps) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    Router::new()
        .route("/health", get(health_handler).fallback(analyze_handler))
        .fallback(analyze_handler)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}
