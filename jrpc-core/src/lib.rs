//! Core JSON-RPC 2.0 types and codec for jrpc-engine
//!
//! This crate provides the message-level building blocks for a JSON-RPC 2.0
//! server:
//!
//! - **Types**: tagged variants for ids and params, per-call state
//! - **Request/Response**: immutable message values with the responder
//!   capability (responses bound to the originating request's id)
//! - **Error taxonomy**: spec-reserved codes, the server-error band, and
//!   canonical message lookup
//! - **Codec**: encode/decode helpers and the payload-shape sniff
//!
//! # Architecture
//!
//! The crate is transport-agnostic: it handles message encoding, decoding
//! and structural validation but never performs I/O. The `jrpc-server` crate
//! builds the dispatch engine, batch processor and stats reporter on top of
//! this foundation.
//!
//! # Example
//!
//! ```rust
//! use jrpc_core::{Id, Params, Request};
//! use serde_json::json;
//!
//! let request = Request::new(
//!     "subtract",
//!     Some(Params::Array(vec![json!(42), json!(23)])),
//!     Id::Number(1.into()),
//! );
//!
//! // Handlers answer through the request itself, so the id is always right.
//! let response = request.success_response(json!(19));
//! assert_eq!(response.to_string(), r#"{"jsonrpc":"2.0","id":1,"result":19}"#);
//! ```

pub mod codec;
pub mod error;
pub mod request;
pub mod response;
pub mod types;

// Re-export the most commonly used items so callers can write
// `jrpc_core::Request` instead of `jrpc_core::request::Request`.
pub use error::{error_message_for_code, Error, ErrorCode, ErrorObject, Result};
pub use request::{generate_request_id, MalformedRequest, Request, VERSION};
pub use response::{Response, Responses};
pub use types::{Id, Params, State};
