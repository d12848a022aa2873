//! Error taxonomy for JSON-RPC 2.0
//!
//! Two kinds of errors live here:
//!
//! - **ErrorCode / ErrorObject**: the wire-format error taxonomy defined by
//!   the JSON-RPC 2.0 spec, plus the implementation-defined server-error band
//! - **Error**: the library-level error returned by the typed decode
//!   constructors (uses thiserror)
//!
//! Nothing inside the dispatch path ever raises an `Error`; every failure
//! there terminates in a well-formed response carrying an [`ErrorObject`].
//!
//! # Reserved Codes
//!
//! - `-32700`: Parse error (invalid JSON)
//! - `-32600`: Invalid request (malformed request object)
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//! - `[-32099, -32000]`: Server error band (implementation-defined)
//! - `0`: library-internal "no error" sentinel, never transmitted

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for jrpc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Inclusive bounds of the implementation-defined server-error band.
pub const SERVER_ERROR_MIN: i32 = -32099;
pub const SERVER_ERROR_MAX: i32 = -32000;

/// Closed enumeration of JSON-RPC 2.0 error codes
///
/// Covers the five spec-reserved codes, the server-error band (any code in
/// `[-32099, -32000]`), the library-internal `Success` sentinel, and a
/// catch-all for everything else. Round-trips through the numeric code via
/// [`ErrorCode::from_code`] and [`ErrorCode::code`].
///
/// # Examples
///
/// ```rust
/// use jrpc_core::ErrorCode;
///
/// assert_eq!(ErrorCode::MethodNotFound.code(), -32601);
/// assert_eq!(ErrorCode::from_code(-32050), ErrorCode::ServerError(-32050));
/// assert_eq!(ErrorCode::from_code(0), ErrorCode::Success);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Not part of the spec: the "no error" sentinel yielded by a successful
    /// response's error-code accessor. Never transmitted on the wire.
    Success,
    /// Invalid JSON was received by the server (-32700)
    ParseError,
    /// The JSON sent is not a valid request object (-32600)
    InvalidRequest,
    /// The method does not exist or is not available (-32601)
    MethodNotFound,
    /// Invalid method parameters (-32602)
    InvalidParams,
    /// Internal JSON-RPC error, before the handler was reached (-32603)
    InternalError,
    /// Implementation-defined server error, any code in `[-32099, -32000]`.
    /// Faults inside a handler map to the generic `-32000`.
    ServerError(i32),
    /// Any code outside the reserved ranges
    Other(i32),
}

impl ErrorCode {
    /// The generic server error, `-32000`.
    pub const SERVER_ERROR: ErrorCode = ErrorCode::ServerError(SERVER_ERROR_MAX);

    /// The numeric wire code.
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::ServerError(code) | ErrorCode::Other(code) => *code,
        }
    }

    /// Classify a numeric wire code.
    pub fn from_code(code: i32) -> ErrorCode {
        match code {
            0 => ErrorCode::Success,
            -32700 => ErrorCode::ParseError,
            -32600 => ErrorCode::InvalidRequest,
            -32601 => ErrorCode::MethodNotFound,
            -32602 => ErrorCode::InvalidParams,
            -32603 => ErrorCode::InternalError,
            code if (SERVER_ERROR_MIN..=SERVER_ERROR_MAX).contains(&code) => {
                ErrorCode::ServerError(code)
            }
            code => ErrorCode::Other(code),
        }
    }

    /// True for any code in the server-error band.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ErrorCode::ServerError(_))
    }

    /// The canonical message for this code, see [`error_message_for_code`].
    pub fn default_message(&self) -> &'static str {
        error_message_for_code(self.code())
    }
}

/// The generic, canonical message for an error code.
///
/// Returns the spec message for each of the five reserved codes,
/// "Server error" for any code in the `[-32099, -32000]` band, and
/// "Unknown error" for everything else (including the `0` sentinel).
pub fn error_message_for_code(code: i32) -> &'static str {
    match code {
        -32700 => "Parse error",
        -32600 => "Invalid request",
        -32601 => "Method not found",
        -32602 => "Invalid params",
        -32603 => "Internal error",
        code if (SERVER_ERROR_MIN..=SERVER_ERROR_MAX).contains(&code) => "Server error",
        _ => "Unknown error",
    }
}

/// JSON-RPC 2.0 wire-format error object
///
/// Appears in the `error` member of a response: a numeric code plus a
/// human-readable message. The message should not carry sensitive detail;
/// response constructors substitute the canonical message when given an
/// empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
}

impl ErrorObject {
    /// Build an error object, substituting the canonical message for the
    /// code when `message` is empty.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            code.default_message().to_string()
        } else {
            message
        };
        Self { code: code.code(), message }
    }
}

impl std::fmt::Display for ErrorObject {
    /// Formats as "[code] message" for readability in logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorObject {}

/// Library-level error for jrpc-core operations
///
/// Raised only by the typed decode constructors (`Request::from_json`,
/// `Responses::from_json`). The dispatch path never raises; it converts
/// every failure into a response value instead.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Serialization or deserialization failure
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The payload is valid JSON but not a valid request object
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_messages_for_reserved_codes() {
        assert_eq!(error_message_for_code(-32700), "Parse error");
        assert_eq!(error_message_for_code(-32600), "Invalid request");
        assert_eq!(error_message_for_code(-32601), "Method not found");
        assert_eq!(error_message_for_code(-32602), "Invalid params");
        assert_eq!(error_message_for_code(-32603), "Internal error");
    }

    #[test]
    fn canonical_message_across_server_error_band() {
        assert_eq!(error_message_for_code(-32000), "Server error");
        assert_eq!(error_message_for_code(-32050), "Server error");
        assert_eq!(error_message_for_code(-32098), "Server error");
        assert_eq!(error_message_for_code(-32099), "Server error");
    }

    #[test]
    fn unknown_codes_fall_through() {
        assert_eq!(error_message_for_code(0), "Unknown error");
        assert_eq!(error_message_for_code(-1), "Unknown error");
        assert_eq!(error_message_for_code(-32100), "Unknown error");
        assert_eq!(error_message_for_code(1234), "Unknown error");
    }

    #[test]
    fn code_round_trip() {
        for code in [-32700, -32600, -32601, -32602, -32603, -32000, -32042, -32099, 0, 7] {
            assert_eq!(ErrorCode::from_code(code).code(), code);
        }
    }

    #[test]
    fn band_classification() {
        assert!(ErrorCode::from_code(-32000).is_server_error());
        assert!(ErrorCode::from_code(-32099).is_server_error());
        assert!(!ErrorCode::from_code(-32100).is_server_error());
        assert!(!ErrorCode::from_code(-32603).is_server_error());
    }

    #[test]
    fn empty_message_substitutes_canonical() {
        let err = ErrorObject::new(ErrorCode::MethodNotFound, "");
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found");

        let err = ErrorObject::new(ErrorCode::SERVER_ERROR, "");
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "Server error");
    }

    #[test]
    fn explicit_message_is_kept() {
        let err = ErrorObject::new(ErrorCode::InvalidRequest, "Batch is empty.");
        assert_eq!(err.code, -32600);
        assert_eq!(err.message, "Batch is empty.");
    }

    #[test]
    fn error_object_display() {
        let err = ErrorObject::new(ErrorCode::MethodNotFound, "");
        assert_eq!(err.to_string(), "[-32601] Method not found");
    }

    #[test]
    fn error_object_wire_shape() {
        let err = ErrorObject::new(ErrorCode::InvalidRequest, "Oops!");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":-32600,"message":"Oops!"}"#);

        let back: ErrorObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
