//! Shared value types for JSON-RPC 2.0 messages
//!
//! This module holds the small tagged variants that requests and responses
//! are built from:
//!
//! - **Id**: the request identifier (string, number, or null)
//! - **Params**: call parameters (ordered array or name→value map)
//! - **State**: a per-call bag of extra values a transport can thread through
//!
//! # Why Tagged Variants?
//!
//! The JSON-RPC 2.0 spec permits heterogeneous shapes for both `id` and
//! `params`. Representing them as enums (rather than a single dynamic value)
//! lets handlers pattern-match exhaustively instead of performing unchecked
//! casts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::fmt;

/// JSON-RPC 2.0 request identifier
///
/// Used to correlate a request with its response. An absent or null id marks
/// the request as a *notification*: it never produces a wire response,
/// regardless of outcome.
///
/// `#[serde(untagged)]` makes the enum serialize directly as the inner value,
/// matching the wire format exactly. A missing `id` field deserializes to
/// `Id::Null` (the two are equivalent per the spec).
///
/// # Examples
///
/// ```rust
/// use jrpc_core::Id;
///
/// let a: Id = "req-123".into();
/// let b: Id = 42i64.into();
///
/// assert!(!a.is_null());
/// assert!(Id::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier - useful for UUIDs or correlation tokens
    String(String),
    /// Numeric identifier - any JSON number, including fractional values
    /// and integers beyond the i64 range
    Number(Number),
    /// Null or absent identifier - marks the request as a notification
    #[default]
    Null,
}

impl Id {
    /// True when the id is null or was absent, i.e. the request is a
    /// notification.
    pub fn is_null(&self) -> bool {
        matches!(self, Id::Null)
    }

    /// Salvage an id from a partially-decoded payload.
    ///
    /// Anything that is not a string or a number degrades to `Id::Null`.
    /// This is used on error paths where the payload never became a
    /// well-formed request but an id may still be recoverable.
    pub fn salvage(value: Option<&Value>) -> Id {
        match value {
            Some(Value::String(s)) => Id::String(s.clone()),
            Some(Value::Number(n)) => Id::Number(n.clone()),
            _ => Id::Null,
        }
    }
}

impl fmt::Display for Id {
    /// Renders as the id's JSON encoding, strings quoted and escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => match serde_json::to_string(s) {
                Ok(json) => f.write_str(&json),
                Err(_) => f.write_str(s),
            },
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n.into())
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id::Number(n.into())
    }
}

/// JSON-RPC 2.0 call parameters
///
/// Per the spec, `params` is either an ordered array (by-position) or a
/// name→value map (by-name). Absent params are modelled as `Option<Params>`
/// on the request itself.
///
/// # Examples
///
/// ```rust
/// use jrpc_core::Params;
/// use serde_json::json;
///
/// let by_position = Params::Array(vec![json!(42), json!(23)]);
/// assert_eq!(by_position.position(0), Some(&json!(42)));
///
/// let by_name: Params = serde_json::from_value(json!({"minuend": 42})).unwrap();
/// assert_eq!(by_name.named("minuend"), Some(&json!(42)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// By-position parameters
    Array(Vec<Value>),
    /// By-name parameters
    Object(Map<String, Value>),
}

impl Params {
    /// Get a by-position parameter. Returns `None` for by-name params or an
    /// out-of-range index.
    pub fn position(&self, index: usize) -> Option<&Value> {
        match self {
            Params::Array(values) => values.get(index),
            Params::Object(_) => None,
        }
    }

    /// Get a by-name parameter. Returns `None` for by-position params or a
    /// missing key.
    pub fn named(&self, key: &str) -> Option<&Value> {
        match self {
            Params::Array(_) => None,
            Params::Object(map) => map.get(key),
        }
    }

    /// Number of parameters in either representation.
    pub fn len(&self) -> usize {
        match self {
            Params::Array(values) => values.len(),
            Params::Object(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Params::Array(values)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::Object(map)
    }
}

/// Per-call state bag
///
/// A transport can pass extra values to handlers for one individual request
/// via [`handle_with_state`](https://docs.rs/jrpc-server). The bag is never
/// serialized and never persisted; it lives exactly as long as the call.
pub type State = HashMap<String, Value>;
