//! MCP (Model Context Protocol) Module
//!
//! This module contains the protocol surface of the server:
//! - JSON-RPC envelope models and protocol constants
//! - The static tool catalog and its input schemas
//! - Argument coercion from raw JSON into typed tool arguments
//! - Method dispatch and response shaping

pub mod coerce;
pub mod handlers;
pub mod helpers;
pub mod models;
