//! JSON-RPC 2.0 dispatch engine
//!
//! This crate implements the message-level semantics of the JSON-RPC 2.0
//! specification: classifying payloads as single requests or batches,
//! validating protocol fields, routing to registered handlers, isolating
//! per-element failures, converting handler panics into well-formed error
//! responses, and keeping live statistics.
//!
//! # Transport Agnostic
//!
//! The engine never performs I/O. A transport (HTTP handler, socket
//! listener, queue consumer) feeds it raw payload text and forwards the
//! returned responses; everything in between is this crate's job.
//!
//! # Core Features
//!
//! - **Method Routing**: register handlers by method name, last write wins
//! - **Batch Processing**: elements are independent; one bad element never
//!   voids the rest
//! - **Panic Isolation**: a handler fault becomes a generic server-error
//!   response, with the detail logged rather than leaked to the wire
//! - **Live Statistics**: lock-free counters, an active-request gauge and
//!   uptime, readable from any thread at any time
//!
//! # Quick Start
//!
//! ```rust
//! use jrpc_server::{from_fn, Server};
//! use serde_json::json;
//!
//! let mut server = Server::new();
//! server.set_handler("subtract", from_fn(|req| {
//!     let p = req.params.as_ref().unwrap();
//!     let a = p.position(0).and_then(|v| v.as_f64()).unwrap_or(0.0);
//!     let b = p.position(1).and_then(|v| v.as_f64()).unwrap_or(0.0);
//!     req.success_response(json!(a - b))
//! }));
//!
//! let responses =
//!     server.handle(r#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1}"#);
//! assert_eq!(responses.to_string(), r#"[{"jsonrpc":"2.0","id":1,"result":19.0}]"#);
//! ```
//!
//! # Concurrency
//!
//! The engine is synchronous per call: `handle` blocks the calling thread
//! for the duration of the handler invocation. It is safe for many threads
//! to call the same server simultaneously; clone the server (cheap, shared
//! internals) or share it behind an `Arc`. Handlers are expected to be
//! registered before concurrent traffic begins.

mod batch;
mod dispatch;
mod handler;
mod router;
mod stats;

pub use handler::{from_fn, from_typed_fn, FnHandler, Handler};
pub use router::Router;
pub use stats::{ServerStats, StatsSnapshot};

use std::sync::Arc;
use std::time::Duration;

/// A JSON-RPC 2.0 server: handler registry, dispatch engine, batch
/// processor and stats reporter in one value.
///
/// Cloning is cheap and clones share the registry and statistics, so a
/// transport can hand one clone to each of its worker threads.
#[derive(Clone, Default)]
pub struct Server {
    router: Router,
    stats: Arc<ServerStats>,
}

impl Server {
    /// Create a server with no handlers registered. The stats clock starts
    /// here.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            stats: Arc::new(ServerStats::new()),
        }
    }

    /// Register (or replace) the handler for a method. Replacing is not an
    /// error; the last write wins.
    pub fn set_handler(&mut self, method: impl Into<String>, handler: Box<dyn Handler>) {
        self.router.register(method, handler);
    }

    /// Get the handler bound to a method, or `None` if unregistered.
    pub fn get_handler(&self, method: &str) -> Option<Arc<dyn Handler>> {
        self.router.get(method)
    }

    /// The method registry.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// A point-in-time copy of the server statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Total payloads received, batch or not. See [`ServerStats`].
    pub fn total_payloads(&self) -> u64 {
        self.stats.total_payloads()
    }

    /// Requests that reached a handler. Malformed and unroutable requests
    /// are not counted.
    pub fn total_requests(&self) -> u64 {
        self.stats.total_requests()
    }

    /// Success responses to non-notification requests.
    pub fn total_success_responses(&self) -> u64 {
        self.stats.total_success_responses()
    }

    /// Error responses, including structural errors produced before a
    /// request object could be built.
    pub fn total_error_responses(&self) -> u64 {
        self.stats.total_error_responses()
    }

    /// Notifications whose handler succeeded. Never surfaced on the wire.
    pub fn total_success_notifications(&self) -> u64 {
        self.stats.total_success_notifications()
    }

    /// Notifications whose outcome was an error. Recorded for
    /// observability; never surfaced on the wire.
    pub fn total_error_notifications(&self) -> u64 {
        self.stats.total_error_notifications()
    }

    /// Handler invocations in progress right now.
    pub fn current_active_requests(&self) -> u64 {
        self.stats.current_active_requests()
    }

    /// Time since the server was constructed.
    pub fn uptime(&self) -> Duration {
        self.stats.uptime()
    }
}
