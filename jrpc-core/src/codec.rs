//! Codec for JSON-RPC message serialization and deserialization
//!
//! Thin wrappers over serde_json plus the payload-shape sniff the batch
//! processor is built on. Classifying the payload *before* typed decoding
//! matters: a batch must keep its elements as raw values so one malformed
//! element cannot void the rest.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The shape of a raw incoming payload
///
/// Produced by [`sniff`]; consumed by the batch processor to decide between
/// the batch and single-request paths.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// A top-level JSON array; elements kept raw for independent handling
    Batch(Vec<Value>),
    /// Any other well-formed JSON value
    Single(Value),
    /// The text was not valid JSON at all
    Malformed,
}

/// Classify a raw payload without losing its elements.
///
/// Never fails: unparseable text is a valid classification
/// ([`RawPayload::Malformed`]), which the engine answers with a
/// ParseError response rather than an error of its own.
///
/// # Examples
///
/// ```rust
/// use jrpc_core::codec::{sniff, RawPayload};
///
/// assert!(matches!(sniff(r#"{"jsonrpc":"2.0","method":"m"}"#), RawPayload::Single(_)));
/// assert!(matches!(sniff("[1,2,3]"), RawPayload::Batch(_)));
/// assert!(matches!(sniff("{nope"), RawPayload::Malformed));
/// ```
pub fn sniff(data: &str) -> RawPayload {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Array(elements)) => RawPayload::Batch(elements),
        Ok(value) => RawPayload::Single(value),
        Err(_) => RawPayload::Malformed,
    }
}

/// Encode any serializable message to compact JSON text.
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode JSON text directly into a specific type.
pub fn decode_as<'de, T: Deserialize<'de>>(data: &'de str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| Error::Serialization(e.to_string()))
}
