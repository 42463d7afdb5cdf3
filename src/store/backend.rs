//! Backing Operation Interface
//!
//! The dispatcher consumes the data store through this narrow contract: one
//! `execute` call per tool invocation, with already-coerced arguments. The
//! store owns all connectivity and query construction; the dispatcher treats
//! it as opaque.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::mcp::coerce::ToolArguments;

/// Outcome of a backing operation that completed without a store fault.
///
/// `Soft` carries the application-level "no data / invalid input" payloads
/// (an object with an `error` or `message` field). Both variants travel as
/// ordinary success envelopes on the wire; keeping them distinct here stops
/// the response shaper from promoting a soft error into a hard one.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreReply {
    /// Real data payload
    Data(Value),
    /// Error-shaped payload reported as a normal success
    Soft(Value),
}

impl StoreReply {
    /// Unwraps the payload for text-content wrapping.
    pub fn into_payload(self) -> Value {
        match self {
            StoreReply::Data(value) | StoreReply::Soft(value) => value,
        }
    }
}

/// Transport/store-level failure; surfaces as a hard `-32603` envelope.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("tool not supported by this store: {0}")]
    UnsupportedTool(String),

    #[error("missing argument {key} for {tool}")]
    MissingArgument { tool: &'static str, key: &'static str },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Contract between the dispatcher and the data store.
///
/// Implementations are shared process-wide behind an `Arc` and must be safe
/// for concurrent use without locking at the call site. The dispatcher drops
/// the returned future when the caller disconnects, so implementations must
/// be cancel-safe and suspend only at store I/O boundaries. No retries
/// happen at this layer; a failed operation surfaces on the first attempt.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Executes the backing operation for `tool` with typed arguments.
    async fn execute(&self, tool: &str, args: &ToolArguments) -> Result<StoreReply, StoreError>;
}
