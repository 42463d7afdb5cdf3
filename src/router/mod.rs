//! Routing module for the document store server

pub mod health;

use crate::store::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        tracing::info!(method = %req.method(), uri = %req.uri(), "request");
        let res = next.run(req).await;
        if !res.status().is_success() {
            tracing::warn!(status = %res.status(), "response");
        }
        res
    });

    // Middleware: CORS (permissive; also answers OPTIONS preflight)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(crate::mcp::handlers::routes())
        .merge(health::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}
