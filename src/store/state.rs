//! Application State Management
//!
//! One state value is built at process start and shared read-only across all
//! requests: the static tool catalog and the injected store handle. Nothing
//! in here mutates between calls; the server holds no per-session state.

use std::sync::Arc;

use super::backend::DocumentStore;
use crate::mcp::models::ToolCatalog;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Process-wide state: the tool catalog plus the backing store client.
pub struct AppState {
    /// Static catalog of callable tools
    pub catalog: ToolCatalog,

    /// Handle to the backing document store; constructed once, never rebuilt
    /// per request. Dropping the state tears the client down with it.
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Creates the state around an injected store implementation.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            catalog: ToolCatalog::standard(),
            store,
        }
    }
}
