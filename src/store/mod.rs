//! Document Store Domain Module
//!
//! This module contains the backing side of the server:
//! - The document record model
//! - The backing-operation interface the dispatcher calls through
//! - An in-memory store implementation
//! - Application state management

pub mod backend;
pub mod memory;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use backend::{DocumentStore, StoreError, StoreReply};
pub use memory::MemoryStore;
pub use state::{AppState, SharedState};
