//! The dispatch engine
//!
//! Runs one logical call: validates protocol fields, routes to the handler,
//! guards against handler panics, classifies the outcome, and updates the
//! statistics. Every failure path terminates in a well-formed response
//! value; nothing here is fatal to the process.
//!
//! # Outcome Classification
//!
//! The outcome of a notification (id absent or null) is recorded in the
//! notification success/error counters and never returned to the caller -
//! even when it is an error. An error notification is an observability
//! fact, not a wire response.

use crate::Server;
use jrpc_core::{ErrorCode, Request, Response, Responses, VERSION};
use std::panic::{self, AssertUnwindSafe};

impl Server {
    /// Handle one already-constructed request.
    ///
    /// Returns zero responses exactly when the request is a notification;
    /// otherwise exactly one, carrying the request's id.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jrpc_server::{from_fn, Server};
    /// use jrpc_core::{Id, Request};
    /// use serde_json::json;
    ///
    /// let mut server = Server::new();
    /// server.set_handler("ping", from_fn(|req| req.success_response(json!("pong"))));
    ///
    /// let responses = server.handle_request(Request::new("ping", None, Id::Number(1.into())));
    /// assert_eq!(responses.len(), 1);
    /// assert_eq!(responses[0].result, Some(json!("pong")));
    /// ```
    pub fn handle_request(&self, request: Request) -> Responses {
        self.stats.record_payload();

        let mut responses = Responses::new();
        if let Some(response) = self.dispatch(request) {
            responses.push(response);
        }
        responses
    }

    /// Validate, route and execute one request, classifying the outcome.
    ///
    /// Returns `None` when the outcome belongs to a notification. Shared by
    /// [`Server::handle_request`] and the batch processor, which is why it
    /// does not touch the payload counter.
    pub(crate) fn dispatch(&self, request: Request) -> Option<Response> {
        let is_notification = request.is_notification();
        let response = self.execute(&request);

        if is_notification {
            if response.error_code() == ErrorCode::Success {
                self.stats.record_success_notification();
            } else {
                self.stats.record_error_notification();
            }
            None
        } else {
            if response.error_code() == ErrorCode::Success {
                self.stats.record_success_response();
            } else {
                self.stats.record_error_response();
            }
            Some(response)
        }
    }

    /// The guarded execution path for one request.
    fn execute(&self, request: &Request) -> Response {
        // Only 2.0 is supported.
        if request.jsonrpc != VERSION {
            tracing::debug!(version = %request.jsonrpc, "rejecting unsupported version");
            return request.error_response(ErrorCode::InvalidRequest, "Version is not 2.0.");
        }

        let Some(handler) = self.router.get(&request.method) else {
            tracing::debug!(method = %request.method, "no handler registered");
            return request.error_response(ErrorCode::MethodNotFound, "");
        };

        // The request is now considered processed, whatever the handler does.
        self.stats.record_request();
        tracing::debug!(method = %request.method, id = %request.id, "invoking handler");

        self.stats.enter_handler();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.call(request)));
        self.stats.leave_handler();

        match outcome {
            Ok(response) => response,
            Err(payload) => {
                // The panic detail may carry sensitive internals; it goes to
                // the log, never to the wire.
                tracing::error!(
                    method = %request.method,
                    panic = panic_message(payload.as_ref()),
                    "handler panicked"
                );
                request.error_response(ErrorCode::SERVER_ERROR, "")
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
