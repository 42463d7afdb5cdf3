//! Document Store Data Models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A single stored document.
///
/// Documents are read-only from the protocol's point of view; the catalog
/// tools only ever look them up or aggregate over them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier within its collection
    #[serde(default)]
    pub id: String,

    /// Customer the document belongs to
    pub customer_id: String,

    /// Document type label (e.g., invoice, receipt)
    pub doc_type: String,

    /// Monetary amount carried by the document
    #[serde(default)]
    pub amount: f64,

    /// Creation time as seconds since the Unix epoch; drives recency ordering
    #[serde(default)]
    pub created_at: u64,

    /// Captures any extra fields (e.g., title, status) dynamically
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
