//! JSON-RPC 2.0 response messages
//!
//! A [`Response`] is constructed once - by the dispatch engine (success,
//! explicit error, or server error) or by decoding wire text - and never
//! mutated. It carries exactly one of `result` or `error`; the constructors
//! enforce the mutual exclusion.
//!
//! [`Responses`] is the collection the engine hands back to the transport:
//! zero entries for a notification, one for a single call, zero or more for
//! a batch.

use crate::error::{ErrorCode, ErrorObject, Result};
use crate::types::Id;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A JSON-RPC 2.0 response object
///
/// Test success or failure with the error-code accessor:
///
/// ```rust
/// use jrpc_core::{ErrorCode, Id, Response};
/// use serde_json::json;
///
/// let response = Response::success(Id::Number(1.into()), json!(19));
/// if response.error_code() == ErrorCode::Success {
///     assert_eq!(response.result, Some(json!(19)));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Protocol version, always "2.0"
    pub jsonrpc: String,
    /// Id of the originating request, or null if none could be determined
    pub id: Id,
    /// Result value; present exactly when `error` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error value; present exactly when `result` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl Response {
    /// Create a success response.
    ///
    /// The result can be any value; the server expects the client to handle
    /// it appropriately. Pass through the originating request's id so the
    /// client can correlate.
    pub fn success(id: Id, result: Value) -> Self {
        Self {
            jsonrpc: crate::request::VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    ///
    /// The message should be human-readable and must not carry sensitive
    /// detail. An empty message is replaced by the canonical message for
    /// the code.
    pub fn error(id: Id, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: crate::request::VERSION.to_string(),
            id,
            result: None,
            error: Some(ErrorObject::new(code, message)),
        }
    }

    /// Convert a generic error condition into a generic server error
    /// (-32000). Use [`Response::error`] with a band code when the client
    /// understands finer-grained server errors.
    pub fn server_error(id: Id, err: impl fmt::Display) -> Self {
        Self::error(id, ErrorCode::SERVER_ERROR, err.to_string())
    }

    /// The error code, or the `Success` sentinel when no error is set.
    pub fn error_code(&self) -> ErrorCode {
        match &self.error {
            Some(error) => ErrorCode::from_code(error.code),
            None => ErrorCode::Success,
        }
    }

    /// The error message, or `""` when no error is set.
    pub fn error_message(&self) -> &str {
        self.error.as_ref().map(|e| e.message.as_str()).unwrap_or("")
    }

    /// True when `result` is set.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// True when `error` is set.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Compact JSON text for this response.
    pub fn to_json(&self) -> Result<String> {
        crate::codec::encode(self)
    }
}

impl fmt::Display for Response {
    /// The string representation of a response is its JSON encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Ok(()),
        }
    }
}

/// The responses produced for one payload
///
/// Empty for notifications, one entry for a single call, zero or more for a
/// batch. Batch entries appear in input order, but callers must correlate
/// by id rather than position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses(Vec<Response>);

impl Responses {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, response: Response) {
        self.0.push(response);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Response> {
        self.0.iter()
    }

    /// Decode responses from wire text: either a single response object or
    /// an array of them. A single object yields a one-element collection.
    pub fn from_json(data: &str) -> Result<Responses> {
        if data.trim_start().starts_with('[') {
            crate::codec::decode_as::<Vec<Response>>(data).map(Responses)
        } else {
            crate::codec::decode_as::<Response>(data).map(|response| Responses(vec![response]))
        }
    }

    /// Compact JSON array text for the collection.
    pub fn to_json(&self) -> Result<String> {
        crate::codec::encode(self)
    }
}

impl fmt::Display for Responses {
    /// The string representation is always a JSON array, even for a single
    /// response.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Ok(()),
        }
    }
}

impl From<Vec<Response>> for Responses {
    fn from(responses: Vec<Response>) -> Self {
        Self(responses)
    }
}

impl IntoIterator for Responses {
    type Item = Response;
    type IntoIter = std::vec::IntoIter<Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = &'a Response;
    type IntoIter = std::slice::Iter<'a, Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Responses {
    type Output = Response;

    fn index(&self, index: usize) -> &Response {
        &self.0[index]
    }
}
