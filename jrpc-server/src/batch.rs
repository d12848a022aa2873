//! Batch processing for raw JSON-RPC payloads
//!
//! The entry point for wire text. A payload is sniffed for shape first:
//! a top-level JSON array is a batch whose elements are handled as fully
//! independent single requests - one bad element never voids the rest -
//! while anything else is handled as a single request.
//!
//! # Error-Code Degradation
//!
//! Malformed JSON at the top level answers with ParseError. A malformed
//! element *inside* a batch answers with InvalidRequest instead: the
//! surrounding array already proved the outer JSON was well-formed.
//!
//! # Suppression Rule
//!
//! A response is suppressed only when it belongs to a genuine notification
//! (id omitted by the client) that succeeded or failed inside dispatch.
//! Structural errors detected before a request object could be built are
//! always surfaced, even though their id is null - the client must learn
//! that its payload was unintelligible.

use crate::Server;
use jrpc_core::codec::{self, RawPayload};
use jrpc_core::{ErrorCode, Id, Request, Response, Responses, State};
use serde_json::Value;

impl Server {
    /// Handle a raw payload with an empty state bag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jrpc_server::{from_fn, Server};
    /// use serde_json::json;
    ///
    /// let mut server = Server::new();
    /// server.set_handler("say_hello", from_fn(|req| {
    ///     let name = req
    ///         .params
    ///         .as_ref()
    ///         .and_then(|p| p.named("name"))
    ///         .and_then(|v| v.as_str())
    ///         .unwrap_or("world")
    ///         .to_string();
    ///     req.success_response(json!(format!("Hello, {}", name)))
    /// }));
    ///
    /// let raw = r#"{"jsonrpc": "2.0", "method": "say_hello", "params": {"name": "Bob"}, "id": 1}"#;
    /// let responses = server.handle(raw);
    /// assert_eq!(responses[0].result, Some(json!("Hello, Bob")));
    /// ```
    pub fn handle(&self, payload: &str) -> Responses {
        self.handle_with_state(payload, State::new())
    }

    /// Handle a raw payload, threading a caller-supplied state bag into
    /// every request of the payload (each element of a batch receives its
    /// own copy).
    #[tracing::instrument(level = "debug", skip_all, fields(payload_len = payload.len()))]
    pub fn handle_with_state(&self, payload: &str, state: State) -> Responses {
        // A batch is one payload, not N.
        self.stats.record_payload();

        let mut responses = Responses::new();
        match codec::sniff(payload) {
            RawPayload::Batch(elements) => {
                // The spec makes an empty batch an invalid request rather
                // than an empty result.
                if elements.is_empty() {
                    self.stats.record_error_response();
                    responses.push(Response::error(
                        Id::Null,
                        ErrorCode::InvalidRequest,
                        "Batch is empty.",
                    ));
                    return responses;
                }

                tracing::debug!(batch_size = elements.len(), "processing batch");
                for element in elements {
                    if let Some(response) = self.handle_single(element, true, state.clone()) {
                        responses.push(response);
                    }
                }
            }
            RawPayload::Single(value) => {
                if let Some(response) = self.handle_single(value, false, state) {
                    responses.push(response);
                }
            }
            RawPayload::Malformed => {
                self.stats.record_error_response();
                responses.push(Response::error(Id::Null, ErrorCode::ParseError, ""));
            }
        }

        tracing::debug!(response_count = responses.len(), "payload processed");
        responses
    }

    /// Resolve one decoded value as an independent single request.
    ///
    /// Returns `None` when the outcome belongs to a notification. Structural
    /// errors count toward the error-response total directly - they never
    /// reached a handler - and are always returned, null id or not.
    fn handle_single(&self, value: Value, part_of_batch: bool, state: State) -> Option<Response> {
        match Request::from_value(value, state) {
            Ok(request) => self.dispatch(request),
            Err(rejection) => {
                self.stats.record_error_response();

                // Inside a batch a would-be ParseError degrades to
                // InvalidRequest: the outer array already parsed.
                let code = if part_of_batch && rejection.code == ErrorCode::ParseError {
                    ErrorCode::InvalidRequest
                } else {
                    rejection.code
                };
                Some(Response::error(rejection.id, code, rejection.message))
            }
        }
    }
}
