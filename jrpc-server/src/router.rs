//! Method registry for JSON-RPC dispatch
//!
//! The router maps method names to handler implementations. Registration is
//! expected to happen before concurrent traffic begins; after that the map
//! is effectively read-only, so lookups need no synchronization.
//!
//! # Thread Safety
//!
//! The handler map lives behind an `Arc`, making the router cheap to clone
//! and share across transport threads. `register` uses `Arc::make_mut`:
//! registration during live traffic is data-race-free (a concurrent lookup
//! observes some consistent prior set of registrations) but not
//! linearizable with lookups, which matches the contract.

use crate::handler::Handler;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of JSON-RPC method handlers
///
/// # Examples
///
/// ```rust
/// use jrpc_server::{from_fn, Router};
/// use serde_json::json;
///
/// let mut router = Router::new();
/// router.register("ping", from_fn(|req| req.success_response(json!("pong"))));
/// assert!(router.has_method("ping"));
/// ```
#[derive(Clone, Default)]
pub struct Router {
    handlers: Arc<HashMap<String, Arc<dyn Handler>>>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(HashMap::new()),
        }
    }

    /// Register (or replace) the handler for a method. Last write wins;
    /// replacing an existing handler is not an error.
    pub fn register(&mut self, method: impl Into<String>, handler: Box<dyn Handler>) {
        let handlers = Arc::make_mut(&mut self.handlers);
        handlers.insert(method.into(), Arc::from(handler));
    }

    /// Get the handler bound to a method, if any.
    pub fn get(&self, method: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(method).cloned()
    }

    /// Check whether a method is registered.
    pub fn has_method(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// All registered method names, in no particular order.
    pub fn methods(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}
