//! JSON-RPC 2.0 request message
//!
//! A [`Request`] is immutable once constructed: either programmatically via
//! the constructors, or by decoding one JSON object. A request whose id is
//! absent or null is a *notification* and never produces a wire response.
//!
//! # Responder Capability
//!
//! Every request exposes convenience constructors bound to its own id
//! ([`Request::success_response`], [`Request::error_response`],
//! [`Request::server_error_response`]) so handler code never has to thread
//! the id manually.
//!
//! # Structural Validation
//!
//! [`Request::from_value`] performs the protocol-required field checks
//! (`jsonrpc` and `method` must be strings, `params` must be structured when
//! present) and reports failures as a [`MalformedRequest`] carrying whatever
//! id could be salvaged from the partial decode. The dispatch engine turns
//! those into error responses; nothing here ever panics or raises.

use crate::error::{Error, ErrorCode, Result};
use crate::response::Response;
use crate::types::{Id, Params, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The only protocol version this engine speaks.
pub const VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request object
///
/// The `jsonrpc` field is kept as a raw string rather than a validated
/// version type: the spec requires rejecting a wrong version at dispatch
/// time with a specific error response, so decoding must not fail first.
///
/// # Examples
///
/// ```rust
/// use jrpc_core::{Id, Params, Request};
/// use serde_json::json;
///
/// let request = Request::new(
///     "subtract",
///     Some(Params::Array(vec![json!(42), json!(23)])),
///     Id::Number(1.into()),
/// );
/// assert_eq!(request.jsonrpc, "2.0");
/// assert!(!request.is_notification());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version string; anything but "2.0" is rejected at dispatch
    pub jsonrpc: String,
    /// Name of the method to invoke
    pub method: String,
    /// Call parameters; omitted from JSON when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    /// Request identifier; null (or absent) marks a notification
    #[serde(default)]
    pub id: Id,
    /// Per-call state bag, supplied by the caller and never serialized
    #[serde(skip)]
    pub state: State,
}

impl Request {
    /// Create a request with version "2.0" and an empty state bag.
    pub fn new(method: impl Into<String>, params: Option<Params>, id: Id) -> Self {
        Self::with_state(method, params, id, State::new())
    }

    /// Create a request carrying a per-call state bag.
    pub fn with_state(
        method: impl Into<String>,
        params: Option<Params>,
        id: Id,
        state: State,
    ) -> Self {
        Self {
            jsonrpc: VERSION.to_string(),
            method: method.into(),
            params,
            id,
            state,
        }
    }

    /// Decode a single request from JSON text.
    ///
    /// Structural problems (non-string `jsonrpc` or `method`, unstructured
    /// `params`) surface as [`Error::InvalidRequest`]; malformed JSON as
    /// [`Error::Serialization`].
    pub fn from_json(data: &str) -> Result<Request> {
        let value: Value =
            serde_json::from_str(data).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_value(value, State::new())
            .map_err(|rejection| Error::InvalidRequest(rejection.error().message))
    }

    /// Build a request from an already-decoded JSON value.
    ///
    /// This is the single-request resolution step shared by the top-level
    /// and per-batch-element paths. On failure the returned
    /// [`MalformedRequest`] carries the salvaged id and the exact error the
    /// caller must answer with.
    pub fn from_value(value: Value, state: State) -> std::result::Result<Request, MalformedRequest> {
        let Value::Object(map) = value else {
            // Not even an object. The caller decides between ParseError and
            // InvalidRequest depending on whether this was a batch element.
            return Err(MalformedRequest {
                id: Id::Null,
                code: ErrorCode::ParseError,
                message: "",
            });
        };

        let id = Id::salvage(map.get("id"));

        let Some(Value::String(jsonrpc)) = map.get("jsonrpc") else {
            return Err(MalformedRequest {
                id,
                code: ErrorCode::InvalidRequest,
                message: "Version (jsonrpc) must be a string.",
            });
        };
        let Some(Value::String(method)) = map.get("method") else {
            return Err(MalformedRequest {
                id,
                code: ErrorCode::InvalidRequest,
                message: "Method must be a string.",
            });
        };

        let params = match map.get("params") {
            None | Some(Value::Null) => None,
            Some(value) => match serde_json::from_value::<Params>(value.clone()) {
                Ok(params) => Some(params),
                Err(_) => {
                    return Err(MalformedRequest {
                        id,
                        code: ErrorCode::InvalidRequest,
                        message: "Params must be an array or object.",
                    })
                }
            },
        };

        Ok(Request {
            jsonrpc: jsonrpc.clone(),
            method: method.clone(),
            params,
            id,
            state,
        })
    }

    /// True when the id is absent or null; notifications never produce a
    /// wire response, regardless of outcome.
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }

    /// Look up a value in the per-call state bag.
    pub fn state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Build a success response bound to this request's id.
    pub fn success_response(&self, result: Value) -> Response {
        Response::success(self.id.clone(), result)
    }

    /// Build an error response bound to this request's id. An empty message
    /// is replaced by the canonical message for the code.
    pub fn error_response(&self, code: ErrorCode, message: impl Into<String>) -> Response {
        Response::error(self.id.clone(), code, message)
    }

    /// Convert a generic error condition into a generic server-error
    /// response (-32000) bound to this request's id.
    pub fn server_error_response(&self, err: impl fmt::Display) -> Response {
        Response::server_error(self.id.clone(), err)
    }

    /// Compact JSON text for this request.
    pub fn to_json(&self) -> Result<String> {
        crate::codec::encode(self)
    }
}

impl fmt::Display for Request {
    /// The string representation of a request is its JSON encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Ok(()),
        }
    }
}

/// A payload that could not be turned into a [`Request`]
///
/// Carries the salvaged id (often null), the error code, and the exact
/// protocol message. The message is `""` when the canonical message for the
/// code should be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRequest {
    /// Whatever id could be salvaged from the partial decode
    pub id: Id,
    /// `ParseError` when the payload was not an object, `InvalidRequest`
    /// for field-level violations
    pub code: ErrorCode,
    /// Exact protocol message; empty means "use the canonical one"
    pub message: &'static str,
}

impl MalformedRequest {
    /// The wire error object this rejection maps to.
    pub fn error(&self) -> crate::error::ErrorObject {
        crate::error::ErrorObject::new(self.code, self.message)
    }
}

/// Generate a random 32-digit hexadecimal request id.
///
/// Unique ids let clients and logs correlate requests with responses. The
/// format matches what you would see from an MD5 digest.
///
/// # Examples
///
/// ```rust
/// let id = jrpc_core::generate_request_id();
/// assert_eq!(id.len(), 32);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_request_id() -> String {
    use rand::Rng;

    let mut bytes = [0u8; 16];
    rand::thread_rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
