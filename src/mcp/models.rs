//! MCP Protocol Models and Constants
//!
//! This module contains the JSON-RPC envelope, the protocol constants, and
//! the static tool catalog with its declared input schemas.

use serde::Deserialize;
use serde_json::{json, Map, Value};

// =============================================================================
// MCP Constants
// =============================================================================

/// Name of the tool returning the N most recent documents in a collection
pub const RECENT_DOCUMENTS_TOOL: &str = "get_recent_documents";
/// Name of the single-document lookup tool
pub const FIND_DOCUMENT_TOOL: &str = "find_document_by_id";
/// Name of the distinct document-type lookup tool
pub const DISTINCT_TYPES_TOOL: &str = "get_customer_document_types";
/// Name of the aggregate amount lookup tool
pub const TOTAL_AMOUNT_TOOL: &str = "get_customer_total_amount";
/// Server identifier
pub const SERVER_NAME: &str = "document-store-rust";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// Method prefix shared by all notification methods
pub const NOTIFICATION_PREFIX: &str = "notifications/";

/// JSON-RPC error codes used on the wire.
///
/// The code space is closed: parse failures, unknown methods, and the
/// internal-error catch-all (which also covers argument-coercion and
/// unknown-tool failures).
pub mod error_codes {
    /// Request body was not valid JSON
    pub const PARSE_ERROR: i32 = -32700;
    /// Method name does not select any dispatch behavior
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Catch-all for failures inside a recognized method
    pub const INTERNAL_ERROR: i32 = -32603;
}

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version tag (should be "2.0"); passed through, never validated
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier, echoed verbatim in the response
    pub id: Option<Value>,
}

// =============================================================================
// Tool Catalog
// =============================================================================

/// Declared type of a tool parameter.
///
/// Tool signatures only ever use these two types; the coercer maps every raw
/// JSON value into one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    /// JSON Schema type tag for this parameter type
    pub fn tag(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
        }
    }
}

/// One parameter declaration in a tool's input schema
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Parameter name as it appears in the raw argument mapping
    pub name: &'static str,

    /// Declared type the coercer must produce
    pub ty: ParamType,

    /// Whether a call without this parameter fails validation
    pub required: bool,

    /// Human-readable description surfaced in `tools/list`
    pub description: &'static str,
}

/// Descriptor for a single callable tool
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    /// Unique stable identifier (lower-snake)
    pub name: &'static str,

    /// Short display title
    pub title: &'static str,

    /// Free-text description
    pub description: &'static str,

    /// Input schema: every parameter the backing operation reads
    pub params: &'static [ParamSpec],
}

impl ToolDescriptor {
    /// Serializes this descriptor into the `tools/list` wire shape.
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in self.params {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.ty.tag(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

const RECENT_DOCUMENTS_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "project_id",
        ty: ParamType::String,
        required: true,
        description: "Project the collection belongs to",
    },
    ParamSpec {
        name: "collection",
        ty: ParamType::String,
        required: true,
        description: "Collection to read from",
    },
    ParamSpec {
        name: "n",
        ty: ParamType::Integer,
        required: true,
        description: "Number of documents to return (1-20)",
    },
];

const FIND_DOCUMENT_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "project_id",
        ty: ParamType::String,
        required: true,
        description: "Project the collection belongs to",
    },
    ParamSpec {
        name: "collection",
        ty: ParamType::String,
        required: true,
        description: "Collection to read from",
    },
    ParamSpec {
        name: "document_id",
        ty: ParamType::String,
        required: true,
        description: "Identifier of the document to fetch",
    },
];

const CUSTOMER_FILTER_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "customer_id",
    ty: ParamType::String,
    required: true,
    description: "Customer whose documents are aggregated",
}];

/// Static, process-wide table of tool descriptors.
///
/// Built once at startup and shared read-only across requests; `tools/list`
/// serializes it in declaration order on every call.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    /// Creates the catalog of document-store tools.
    pub fn standard() -> Self {
        Self {
            tools: vec![
                ToolDescriptor {
                    name: RECENT_DOCUMENTS_TOOL,
                    title: "Get recent documents",
                    description:
                        "Returns the N most recent documents in a collection, newest first.",
                    params: RECENT_DOCUMENTS_PARAMS,
                },
                ToolDescriptor {
                    name: FIND_DOCUMENT_TOOL,
                    title: "Find document by id",
                    description: "Returns the single document with the given identifier.",
                    params: FIND_DOCUMENT_PARAMS,
                },
                ToolDescriptor {
                    name: DISTINCT_TYPES_TOOL,
                    title: "Get customer document types",
                    description: "Returns the distinct document types on file for a customer.",
                    params: CUSTOMER_FILTER_PARAMS,
                },
                ToolDescriptor {
                    name: TOTAL_AMOUNT_TOOL,
                    title: "Get customer total amount",
                    description: "Returns the summed amount across a customer's documents.",
                    params: CUSTOMER_FILTER_PARAMS,
                },
            ],
        }
    }

    /// Looks up a tool descriptor by its exact name.
    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Serializes all descriptors in declaration order.
    pub fn to_json(&self) -> Vec<Value> {
        self.tools.iter().map(ToolDescriptor::to_json).collect()
    }
}
