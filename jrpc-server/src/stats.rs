//! Live server statistics
//!
//! The dispatch engine is the only writer; reads may happen from any thread
//! at any time. Each counter is an independent atomic integer - there is no
//! compound structure and therefore no lock and no torn reads. Relaxed
//! ordering is sufficient because no counter's value depends on another's.
//!
//! # Counters
//!
//! - **total_payloads**: payloads received, batch or not - a batch is one
//!   payload, not N
//! - **total_requests**: requests that actually reached a handler; malformed
//!   and unroutable requests are not counted
//! - **total_success_responses / total_error_responses**: outcomes of
//!   non-notification requests, plus structural errors produced before a
//!   request object could be built
//! - **total_success_notifications / total_error_notifications**: outcomes
//!   of notifications, recorded for observability even though notifications
//!   never produce a wire response
//! - **current_active_requests**: handler invocations in progress right now
//!
//! Uptime is recomputed from the construction `Instant` on every read, so it
//! is monotonic for the life of the process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Thread-safe statistics for one server instance.
#[derive(Debug)]
pub struct ServerStats {
    total_payloads: AtomicU64,
    total_requests: AtomicU64,
    total_success_responses: AtomicU64,
    total_error_responses: AtomicU64,
    total_success_notifications: AtomicU64,
    total_error_notifications: AtomicU64,
    current_active_requests: AtomicU64,
    started: Instant,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            total_payloads: AtomicU64::new(0),
            total_requests: AtomicU64::new(0),
            total_success_responses: AtomicU64::new(0),
            total_error_responses: AtomicU64::new(0),
            total_success_notifications: AtomicU64::new(0),
            total_error_notifications: AtomicU64::new(0),
            current_active_requests: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub(crate) fn record_payload(&self) {
        self.total_payloads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success_response(&self) {
        self.total_success_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_error_response(&self) {
        self.total_error_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success_notification(&self) {
        self.total_success_notifications.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_error_notification(&self) {
        self.total_error_notifications.fetch_add(1, Ordering::Relaxed);
    }

    /// Called immediately before a handler is invoked. Must be paired with
    /// [`ServerStats::leave_handler`] on every exit path, including panic.
    pub(crate) fn enter_handler(&self) {
        self.current_active_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn leave_handler(&self) {
        self.current_active_requests.fetch_sub(1, Ordering::Relaxed);
    }

    /// Total payloads received. All payload kinds - success, malformed,
    /// invalid, error, batch or notification - count as one payload each.
    pub fn total_payloads(&self) -> u64 {
        self.total_payloads.load(Ordering::Relaxed)
    }

    /// Requests that ended up calling a handler. A batch only counts the
    /// elements that reached a handler.
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn total_success_responses(&self) -> u64 {
        self.total_success_responses.load(Ordering::Relaxed)
    }

    pub fn total_error_responses(&self) -> u64 {
        self.total_error_responses.load(Ordering::Relaxed)
    }

    pub fn total_success_notifications(&self) -> u64 {
        self.total_success_notifications.load(Ordering::Relaxed)
    }

    pub fn total_error_notifications(&self) -> u64 {
        self.total_error_notifications.load(Ordering::Relaxed)
    }

    /// Handler invocations in progress right now. Observability only.
    pub fn current_active_requests(&self) -> u64 {
        self.current_active_requests.load(Ordering::Relaxed)
    }

    /// Time since the server was constructed. Recomputed per read.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// A point-in-time copy of every counter. Individual counters are
    /// indivisible; the snapshot as a whole is not taken atomically.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_payloads: self.total_payloads(),
            total_requests: self.total_requests(),
            total_success_responses: self.total_success_responses(),
            total_error_responses: self.total_error_responses(),
            total_success_notifications: self.total_success_notifications(),
            total_error_notifications: self.total_error_notifications(),
            current_active_requests: self.current_active_requests(),
            uptime: self.uptime(),
        }
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of the server statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_payloads: u64,
    pub total_requests: u64,
    pub total_success_responses: u64,
    pub total_error_responses: u64,
    pub total_success_notifications: u64,
    pub total_error_notifications: u64,
    pub current_active_requests: u64,
    pub uptime: Duration,
}
