//! In-Memory Document Store
//!
//! A `DashMap`-backed implementation of the backing-operation interface.
//! Collections are keyed by `(project_id, collection)` and hold plain
//! vectors of documents; all catalog tools are single-pass lookups or
//! aggregations over those vectors.

use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};
use uuid::Uuid;

use super::backend::{DocumentStore, StoreError, StoreReply};
use super::models::Document;
use crate::mcp::coerce::ToolArguments;
use crate::mcp::models::{
    DISTINCT_TYPES_TOOL, FIND_DOCUMENT_TOOL, RECENT_DOCUMENTS_TOOL, TOTAL_AMOUNT_TOOL,
};

/// Inclusive bounds accepted by the recent-documents lookup
const RECENT_MIN: i32 = 1;
const RECENT_MAX: i32 = 20;

/// In-memory store, safe for concurrent use without external locking.
#[derive(Default)]
pub struct MemoryStore {
    /// Documents grouped by (project_id, collection)
    collections: DashMap<(String, String), Vec<Document>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a small demo data set so a fresh
    /// server answers tool calls meaningfully.
    pub fn with_sample_data() -> Self {
        let store = Self::new();

        let samples = [
            ("cust-homer", "invoice", 120.50, 1_714_000_100),
            ("cust-homer", "invoice", 80.00, 1_714_000_400),
            ("cust-homer", "receipt", 12.99, 1_714_000_700),
            ("cust-ned", "invoice", 999.95, 1_714_001_000),
            ("cust-ned", "contract", 0.0, 1_714_001_300),
        ];

        for (customer_id, doc_type, amount, created_at) in samples {
            store.insert(
                "acme-42",
                "documents",
                Document {
                    id: String::new(),
                    customer_id: customer_id.to_string(),
                    doc_type: doc_type.to_string(),
                    amount,
                    created_at,
                    extra: Default::default(),
                },
            );
        }

        store
    }

    /// Stores a document, assigning a fresh id when the record carries none.
    /// Returns the id under which the document was stored.
    pub fn insert(&self, project_id: &str, collection: &str, mut doc: Document) -> String {
        if doc.id.is_empty() {
            doc.id = Uuid::new_v4().simple().to_string();
        }
        let id = doc.id.clone();

        self.collections
            .entry((project_id.to_string(), collection.to_string()))
            .or_default()
            .push(doc);

        id
    }

    fn recent_documents(&self, project_id: &str, collection: &str, n: i32) -> StoreReply {
        if !(RECENT_MIN..=RECENT_MAX).contains(&n) {
            // Range violation is an input problem, not a store fault: it is
            // reported inside a normal success payload.
            return StoreReply::Soft(json!({
                "error": format!("n must be between {RECENT_MIN} and {RECENT_MAX} (got {n})"),
                "statusCode": 400,
            }));
        }

        let mut documents = self
            .collections
            .get(&(project_id.to_string(), collection.to_string()))
            .map(|entry| entry.clone())
            .unwrap_or_default();

        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        documents.truncate(n as usize);
        let count = documents.len();

        StoreReply::Data(json!({
            "documents": documents,
            "count": count,
        }))
    }

    fn find_document(&self, project_id: &str, collection: &str, document_id: &str) -> StoreReply {
        let found = self
            .collections
            .get(&(project_id.to_string(), collection.to_string()))
            .and_then(|entry| entry.iter().find(|doc| doc.id == document_id).cloned());

        match found {
            Some(doc) => StoreReply::Data(serde_json::to_value(doc).unwrap_or(Value::Null)),
            None => StoreReply::Soft(json!({
                "message": format!("No document found with id {document_id}"),
            })),
        }
    }

    fn distinct_types(&self, customer_id: &str) -> StoreReply {
        let types: BTreeSet<String> = self
            .collections
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|doc| doc.customer_id == customer_id)
                    .map(|doc| doc.doc_type.clone())
                    .collect::<Vec<_>>()
            })
            .collect();

        if types.is_empty() {
            return StoreReply::Soft(json!({
                "customerId": customer_id,
                "documentTypes": [],
                "count": 0,
                "message": format!("No documents found for customer {customer_id}"),
            }));
        }

        StoreReply::Data(json!({
            "customerId": customer_id,
            "count": types.len(),
            "documentTypes": types,
        }))
    }

    fn total_amount(&self, customer_id: &str) -> StoreReply {
        let mut total = 0.0;
        let mut count: u64 = 0;

        for entry in self.collections.iter() {
            for doc in entry.value().iter().filter(|d| d.customer_id == customer_id) {
                total += doc.amount;
                count += 1;
            }
        }

        if count == 0 {
            return StoreReply::Soft(json!({
                "customerId": customer_id,
                "totalAmount": 0,
                "documentCount": 0,
                "message": format!("No documents found for customer {customer_id}"),
            }));
        }

        StoreReply::Data(json!({
            "customerId": customer_id,
            "totalAmount": total,
            "documentCount": count,
        }))
    }
}

/// Fetches a string argument the coercer guarantees for required parameters.
fn str_arg(
    args: &ToolArguments,
    tool: &'static str,
    key: &'static str,
) -> Result<String, StoreError> {
    args.get_str(key)
        .map(str::to_string)
        .ok_or(StoreError::MissingArgument { tool, key })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn execute(&self, tool: &str, args: &ToolArguments) -> Result<StoreReply, StoreError> {
        match tool {
            RECENT_DOCUMENTS_TOOL => {
                let project_id = str_arg(args, RECENT_DOCUMENTS_TOOL, "project_id")?;
                let collection = str_arg(args, RECENT_DOCUMENTS_TOOL, "collection")?;
                let n = args.get_int("n").ok_or(StoreError::MissingArgument {
                    tool: RECENT_DOCUMENTS_TOOL,
                    key: "n",
                })?;
                Ok(self.recent_documents(&project_id, &collection, n))
            }
            FIND_DOCUMENT_TOOL => {
                let project_id = str_arg(args, FIND_DOCUMENT_TOOL, "project_id")?;
                let collection = str_arg(args, FIND_DOCUMENT_TOOL, "collection")?;
                let document_id = str_arg(args, FIND_DOCUMENT_TOOL, "document_id")?;
                Ok(self.find_document(&project_id, &collection, &document_id))
            }
            DISTINCT_TYPES_TOOL => {
                let customer_id = str_arg(args, DISTINCT_TYPES_TOOL, "customer_id")?;
                Ok(self.distinct_types(&customer_id))
            }
            TOTAL_AMOUNT_TOOL => {
                let customer_id = str_arg(args, TOTAL_AMOUNT_TOOL, "customer_id")?;
                Ok(self.total_amount(&customer_id))
            }
            other => Err(StoreError::UnsupportedTool(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, customer: &str, doc_type: &str, amount: f64, created_at: u64) -> Document {
        Document {
            id: id.to_string(),
            customer_id: customer.to_string(),
            doc_type: doc_type.to_string(),
            amount,
            created_at,
            extra: Default::default(),
        }
    }

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert("p1", "invoices", doc("a", "cust-1", "invoice", 10.0, 100));
        store.insert("p1", "invoices", doc("b", "cust-1", "invoice", 20.0, 300));
        store.insert("p1", "invoices", doc("c", "cust-2", "receipt", 5.0, 200));
        store
    }

    #[test]
    fn recent_orders_newest_first() {
        let store = seeded();
        let reply = store.recent_documents("p1", "invoices", 2);

        let StoreReply::Data(payload) = reply else {
            panic!("expected data reply");
        };
        let docs = payload["documents"].as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["id"], "b");
        assert_eq!(docs[1]["id"], "c");
    }

    #[test]
    fn recent_bounds_produce_soft_errors() {
        let store = seeded();
        for n in [0, -1, 21, 25] {
            let reply = store.recent_documents("p1", "invoices", n);
            let StoreReply::Soft(payload) = reply else {
                panic!("expected soft reply for n={n}");
            };
            assert_eq!(payload["statusCode"], 400);
            assert!(payload["error"].as_str().unwrap().contains("between 1 and 20"));
        }

        // Boundary values are accepted
        assert!(matches!(
            store.recent_documents("p1", "invoices", 1),
            StoreReply::Data(_)
        ));
        assert!(matches!(
            store.recent_documents("p1", "invoices", 20),
            StoreReply::Data(_)
        ));
    }

    #[test]
    fn find_miss_is_a_soft_message() {
        let store = seeded();
        let StoreReply::Soft(payload) = store.find_document("p1", "invoices", "zzz") else {
            panic!("expected soft reply");
        };
        assert!(payload["message"].as_str().unwrap().contains("zzz"));
    }

    #[test]
    fn aggregates_fall_back_to_zero_defaults() {
        let store = seeded();

        let StoreReply::Data(payload) = store.total_amount("cust-1") else {
            panic!("expected data reply");
        };
        assert_eq!(payload["totalAmount"], 30.0);
        assert_eq!(payload["documentCount"], 2);

        let StoreReply::Soft(payload) = store.total_amount("nobody") else {
            panic!("expected soft reply");
        };
        assert_eq!(payload["totalAmount"], 0);
        assert_eq!(payload["documentCount"], 0);
        assert!(payload["message"].as_str().unwrap().contains("nobody"));
    }

    #[test]
    fn distinct_types_are_deduplicated_and_sorted() {
        let store = seeded();
        store.insert("p1", "archive", doc("d", "cust-1", "contract", 0.0, 400));

        let StoreReply::Data(payload) = store.distinct_types("cust-1") else {
            panic!("expected data reply");
        };
        assert_eq!(payload["count"], 2);
        assert_eq!(payload["documentTypes"], serde_json::json!(["contract", "invoice"]));
    }

    #[test]
    fn insert_generates_ids_when_absent() {
        let store = MemoryStore::new();
        let id = store.insert("p1", "invoices", doc("", "cust-1", "invoice", 1.0, 1));
        assert!(!id.is_empty());

        let StoreReply::Data(found) = store.find_document("p1", "invoices", &id) else {
            panic!("expected data reply");
        };
        assert_eq!(found["id"], serde_json::json!(id));
    }
}
