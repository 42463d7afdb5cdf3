use document_store_rust::router::create_app_router;
use document_store_rust::store::{AppState, MemoryStore};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Structured logging to stdout
    tracing_subscriber::fmt().init();

    // Initialize application state; the store handle is built once and
    // shared across all requests
    let store = Arc::new(MemoryStore::with_sample_data());
    let state = Arc::new(AppState::new(store));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address (PORT overrides the default)
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "MCP document store server listening");

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
