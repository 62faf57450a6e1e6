//! HTTP server for the relay bot.
//!
//! This module implements the HTTP surface that:
//! - Accepts webhooks from GitHub, validates signatures, and relays summaries
//! - Accepts message notifications from Webex and feeds the chat session
//! - Provides a health check for liveness probes
//!
//! # Endpoints
//!
//! - `GET /` - Health check (JSON)
//! - `POST /github` - Accepts GitHub webhook deliveries
//! - `POST /webex` - Accepts Webex message-webhook notifications

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use crate::bot::Session;
use crate::metrics::Metrics;
use crate::relay::ChatRelay;
use crate::types::RoomId;

pub mod health;
pub mod messages;
pub mod webhook;

pub use health::health_handler;
pub use messages::message_handler;
pub use webhook::webhook_handler;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. It contains
/// the read-only configuration and collaborators needed for request handling;
/// nothing in it is mutated after startup apart from the metrics counters.
pub struct AppState<R> {
    inner: Arc<AppStateInner<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<R> {
    /// Webhook secret for HMAC-SHA256 signature verification.
    webhook_secret: SecretString,

    /// Destination room for relayed events.
    room_id: RoomId,

    /// Chat backend used for relaying and for fetching notified messages.
    relay: R,

    /// The chat-bot session answering commands.
    session: Session<R>,

    /// Dispatcher counters.
    metrics: Metrics,

    /// Bound applied to each relay call.
    relay_timeout: Duration,

    /// Whether structurally incomplete events are rejected with 400.
    strict_events: bool,
}

impl<R: ChatRelay> AppState<R> {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `webhook_secret` - Secret for verifying webhook signatures
    /// * `room_id` - Destination room for relayed events
    /// * `relay` - The chat backend
    /// * `session` - The chat-bot session
    /// * `relay_timeout` - Bound applied to each relay call
    /// * `strict_events` - Incomplete-event policy (reject vs acknowledge)
    pub fn new(
        webhook_secret: SecretString,
        room_id: RoomId,
        relay: R,
        session: Session<R>,
        relay_timeout: Duration,
        strict_events: bool,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret,
                room_id,
                relay,
                session,
                metrics: Metrics::new(),
                relay_timeout,
                strict_events,
            }),
        }
    }

    /// Returns the webhook secret.
    pub fn webhook_secret(&self) -> &SecretString {
        &self.inner.webhook_secret
    }

    /// Returns the destination room.
    pub fn room_id(&self) -> &RoomId {
        &self.inner.room_id
    }

    /// Returns the chat backend.
    pub fn relay(&self) -> &R {
        &self.inner.relay
    }

    /// Returns the chat-bot session.
    pub fn session(&self) -> &Session<R> {
        &self.inner.session
    }

    /// Returns the dispatcher counters.
    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }

    /// Returns the bound applied to each relay call.
    pub fn relay_timeout(&self) -> Duration {
        self.inner.relay_timeout
    }

    /// Returns true when incomplete events are rejected with 400.
    pub fn strict_events(&self) -> bool {
        self.inner.strict_events
    }
}

/// Builds the axum Router with all endpoints.
///
/// `max_body_bytes` caps request bodies; requests beyond it are rejected
/// with 413 before the handler runs.
pub fn build_router<R>(app_state: AppState<R>, max_body_bytes: usize) -> axum::Router
where
    R: ChatRelay + Send + Sync + 'static,
{
    use axum::extract::DefaultBodyLimit;
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/", get(health_handler))
        .route("/github", post(webhook_handler::<R>))
        .route("/webex", post(message_handler::<R>))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(app_state)
}
