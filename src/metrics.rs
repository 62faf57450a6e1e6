//! In-process counters for webhook processing.
//!
//! Counters are decoupled from console logging: the dispatcher records
//! outcomes here, and `snapshot()` exposes them for assertions and for
//! periodic reporting. All counters are relaxed atomics; exact cross-counter
//! consistency is not required.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for the webhook dispatcher.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Deliveries received, before any validation.
    received_total: AtomicU64,
    /// Deliveries rejected for a missing or invalid signature.
    auth_rejected_total: AtomicU64,
    /// Deliveries with an unparseable or structurally incomplete payload.
    malformed_total: AtomicU64,
    /// Deliveries acknowledged without relaying (unsupported event type).
    unsupported_total: AtomicU64,
    /// Messages successfully handed to the chat backend.
    relayed_total: AtomicU64,
    /// Relay attempts that failed or timed out.
    relay_failed_total: AtomicU64,
    /// Total processing latency in microseconds.
    latency_total_us: AtomicU64,
    /// Number of latency samples.
    latency_count: AtomicU64,
}

impl Metrics {
    /// Creates a new metrics collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a received delivery.
    pub fn record_received(&self) {
        self.received_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an authentication rejection.
    pub fn record_auth_rejected(&self) {
        self.auth_rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a malformed or structurally incomplete payload.
    pub fn record_malformed(&self) {
        self.malformed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an unsupported event type.
    pub fn record_unsupported(&self) {
        self.unsupported_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful relay.
    pub fn record_relayed(&self) {
        self.relayed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed or timed-out relay attempt.
    pub fn record_relay_failed(&self) {
        self.relay_failed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records end-to-end processing latency for one delivery.
    pub fn record_latency(&self, duration: Duration) {
        let us = duration.as_micros() as u64;
        self.latency_total_us.fetch_add(us, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            received_total: self.received_total.load(Ordering::Relaxed),
            auth_rejected_total: self.auth_rejected_total.load(Ordering::Relaxed),
            malformed_total: self.malformed_total.load(Ordering::Relaxed),
            unsupported_total: self.unsupported_total.load(Ordering::Relaxed),
            relayed_total: self.relayed_total.load(Ordering::Relaxed),
            relay_failed_total: self.relay_failed_total.load(Ordering::Relaxed),
            latency_total_us: self.latency_total_us.load(Ordering::Relaxed),
            latency_count: self.latency_count.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of the dispatcher counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub received_total: u64,
    pub auth_rejected_total: u64,
    pub malformed_total: u64,
    pub unsupported_total: u64,
    pub relayed_total: u64,
    pub relay_failed_total: u64,
    pub latency_total_us: u64,
    pub latency_count: u64,
}

impl MetricsSnapshot {
    /// Average processing latency in microseconds, or `None` with no samples.
    pub fn average_latency_us(&self) -> Option<u64> {
        if self.latency_count == 0 {
            None
        } else {
            Some(self.latency_total_us / self.latency_count)
        }
    }
}
