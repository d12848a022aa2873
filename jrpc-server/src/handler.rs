//! Handler traits and adapters for JSON-RPC methods
//!
//! A handler is the business-logic end of a dispatch: it receives the
//! validated [`Request`] (including its per-call state bag) and must produce
//! a [`Response`]. Handlers answer through the request's responder methods
//! so the response id is always bound correctly.
//!
//! # Synchronous by Design
//!
//! The engine is synchronous per call: a handler runs to completion (or
//! panics) on the calling thread. Handlers must be `Send + Sync` because a
//! transport may drive the same server from many threads at once.
//!
//! # Creating Handlers
//!
//! - [`from_fn`]: wrap a closure working with the raw request
//! - [`from_typed_fn`]: wrap a closure with typed params and result
//!
//! # Examples
//!
//! ```rust
//! use jrpc_server::from_fn;
//! use serde_json::json;
//!
//! let handler = from_fn(|request| {
//!     request.success_response(json!({"status": "ok"}))
//! });
//! ```

use jrpc_core::{ErrorCode, ErrorObject, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Trait for JSON-RPC method handlers
///
/// Implementations must be stateless or use interior mutability; the same
/// handler instance serves concurrent calls.
///
/// You typically don't implement this trait directly - use [`from_fn`] or
/// [`from_typed_fn`] instead.
pub trait Handler: Send + Sync {
    /// Respond to one request.
    ///
    /// Domain errors should be returned via
    /// [`Request::error_response`]/[`Request::server_error_response`]; a
    /// panic is caught at the dispatch boundary and converted to a generic
    /// server-error response.
    fn call(&self, request: &Request) -> Response;
}

/// Wrapper that adapts a plain function into a [`Handler`].
///
/// Orphan rules prevent implementing `Handler` directly for closures; this
/// wrapper provides a type we own.
pub struct FnHandler<F>
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    func: F,
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn call(&self, request: &Request) -> Response {
        (self.func)(request)
    }
}

/// Create a handler from a function that works with the raw request.
///
/// # Examples
///
/// ```rust
/// use jrpc_server::from_fn;
/// use serde_json::json;
///
/// let echo = from_fn(|request| {
///     let params = serde_json::to_value(&request.params).unwrap_or(serde_json::Value::Null);
///     request.success_response(json!({"echo": params}))
/// });
/// ```
pub fn from_fn<F>(func: F) -> Box<dyn Handler>
where
    F: Fn(&Request) -> Response + Send + Sync + 'static,
{
    Box::new(FnHandler { func })
}

/// Create a handler with automatic param and result conversion.
///
/// The request params are deserialized into `P` (a params-less request
/// deserializes from JSON null, which works for option and unit types);
/// a deserialization failure answers with `InvalidParams`. The function
/// returns either a result serialized into the success response, or an
/// [`ErrorObject`] turned into an error response.
///
/// # Examples
///
/// ```rust
/// use jrpc_server::from_typed_fn;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct SubtractParams {
///     minuend: f64,
///     subtrahend: f64,
/// }
///
/// let subtract = from_typed_fn(|params: SubtractParams| {
///     Ok(params.minuend - params.subtrahend)
/// });
/// ```
pub fn from_typed_fn<P, R, F>(func: F) -> Box<dyn Handler>
where
    P: DeserializeOwned,
    R: Serialize,
    F: Fn(P) -> Result<R, ErrorObject> + Send + Sync + 'static,
{
    from_fn(move |request: &Request| {
        let raw = match &request.params {
            Some(params) => match serde_json::to_value(params) {
                Ok(value) => value,
                Err(e) => {
                    return request.error_response(ErrorCode::InternalError, e.to_string())
                }
            },
            None => Value::Null,
        };

        let params: P = match serde_json::from_value(raw) {
            Ok(params) => params,
            Err(e) => return request.error_response(ErrorCode::InvalidParams, e.to_string()),
        };

        match func(params) {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => request.success_response(value),
                Err(e) => request.error_response(ErrorCode::InternalError, e.to_string()),
            },
            Err(error) => request.error_response(ErrorCode::from_code(error.code), error.message),
        }
    })
}
