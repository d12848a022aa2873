//! jrpc-engine - a transport-agnostic JSON-RPC 2.0 message engine
//!
//! This is the convenience crate that re-exports the engine's sub-crates.
//! Use it if you want a single dependency covering the whole surface.
//!
//! # Architecture
//!
//! The engine is organized into modular crates:
//!
//! - **jrpc-core**: message model, error taxonomy and codec
//! - **jrpc-server**: handler registry, dispatch engine, batch processing
//!   and statistics
//!
//! The engine never performs I/O. A transport of your choosing (HTTP
//! handler, socket loop, queue consumer) feeds payload text in and writes
//! the returned responses out.
//!
//! # Quick Start
//!
//! ```rust
//! use jrpc_engine::{from_typed_fn, Server};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct SubtractParams {
//!     minuend: f64,
//!     subtrahend: f64,
//! }
//!
//! let mut server = Server::new();
//! server.set_handler("subtract", from_typed_fn(|p: SubtractParams| {
//!     Ok(p.minuend - p.subtrahend)
//! }));
//!
//! let responses = server.handle(
//!     r#"{"jsonrpc": "2.0", "method": "subtract", "params": {"minuend": 42, "subtrahend": 23}, "id": 1}"#,
//! );
//! assert_eq!(responses[0].result, Some(json!(19.0)));
//! ```

pub use jrpc_core as core;
pub use jrpc_server as server;

// Convenience re-exports of the most commonly used types, so simple
// consumers never have to name a sub-crate.
pub use jrpc_core::{
    generate_request_id, ErrorCode, ErrorObject, Id, Params, Request, Response, Responses, State,
};
pub use jrpc_server::{from_fn, from_typed_fn, Handler, Server, StatsSnapshot};
