//! GitHub webhook endpoint handler.
//!
//! The dispatcher for `POST /github`. One request moves through signature
//! verification, JSON validation, event parsing, formatting, and a single
//! relay attempt, in that order. Authentication and parsing failures
//! terminate the request with an error status; relay failures are logged and
//! counted but the webhook sender still sees success, so GitHub does not
//! retry-storm on transient chat problems.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use secrecy::ExposeSecret;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::relay::{ChatRelay, RelayError};
use crate::types::DeliveryId;
use crate::webhooks::{format_event, parse_webhook, verify_signature};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Response body for deliveries acknowledged without a relay attempt.
const BODY_RECEIVED: &str = "Event received";
/// Response body for deliveries that reached the relay stage.
const BODY_PROCESSED: &str = "Event processed";

/// Errors that terminate a webhook request with an error status.
///
/// The two signature variants deliberately produce distinct response bodies;
/// that matches the documented wire contract of this service.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No signature header on the request.
    #[error("Signature missing")]
    SignatureMissing,

    /// Signature header present but failed verification.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The body is not valid JSON.
    #[error("Invalid JSON payload")]
    InvalidJson,

    /// The payload lacks the structure its declared event type requires.
    ///
    /// Only produced in strict mode; lenient mode acknowledges instead.
    #[error("Invalid event payload")]
    IncompleteEvent,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match &self {
            WebhookError::SignatureMissing | WebhookError::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
            }
            WebhookError::InvalidJson | WebhookError::IncompleteEvent => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Webhook handler for GitHub deliveries.
///
/// # Request
///
/// - Method: POST
/// - Headers:
///   - `X-Hub-Signature-256`: HMAC-SHA256 signature of the payload (required)
///   - `X-GitHub-Event`: Event type (e.g., "push", "issues")
///   - `X-GitHub-Delivery`: Unique delivery ID, used for log correlation
/// - Body: JSON webhook payload, capped by the configured body limit
///
/// # Response
///
/// - 200 `Event processed`: Supported event; one relay attempt was made
///   (relay failure does not change the status)
/// - 200 `Event received`: Unsupported event type; nothing relayed
/// - 400: Malformed JSON, or incomplete payload in strict mode
/// - 401 `Signature missing` / `Invalid signature`
/// - 413: Body over the configured size cap
pub async fn webhook_handler<R: ChatRelay>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let started = Instant::now();
    state.metrics().record_received();

    let delivery = optional_header(&headers, HEADER_DELIVERY).map(DeliveryId::new);

    // Verify the signature over the exact bytes received, before any parsing.
    let Some(signature_header) = optional_header(&headers, HEADER_SIGNATURE) else {
        warn!(?delivery, "webhook rejected: no signature header");
        state.metrics().record_auth_rejected();
        return Err(WebhookError::SignatureMissing);
    };

    let secret = state.webhook_secret();
    if !verify_signature(&body, &signature_header, secret.expose_secret().as_bytes()) {
        warn!(?delivery, "webhook rejected: signature verification failed");
        state.metrics().record_auth_rejected();
        return Err(WebhookError::InvalidSignature);
    }

    // A missing event-type header is treated like an unsupported event type.
    let event_type = optional_header(&headers, HEADER_EVENT).unwrap_or_default();

    debug!(?delivery, event_type = %event_type, "received webhook");

    // The body must be JSON regardless of event type.
    if serde_json::from_slice::<serde_json::Value>(&body).is_err() {
        warn!(?delivery, "webhook rejected: body is not valid JSON");
        state.metrics().record_malformed();
        return Err(WebhookError::InvalidJson);
    }

    let event = match parse_webhook(&event_type, &body) {
        Ok(Some(event)) => event,
        Ok(None) => {
            debug!(?delivery, event_type = %event_type, "unsupported event type acknowledged");
            state.metrics().record_unsupported();
            state.metrics().record_latency(started.elapsed());
            return Ok((StatusCode::OK, BODY_RECEIVED));
        }
        Err(error) => {
            warn!(
                ?delivery,
                event_type = %event_type,
                %error,
                "payload missing required structure for its event type"
            );
            state.metrics().record_malformed();
            if state.strict_events() {
                return Err(WebhookError::IncompleteEvent);
            }
            state.metrics().record_latency(started.elapsed());
            return Ok((StatusCode::OK, BODY_RECEIVED));
        }
    };

    let message = format_event(&event);

    // Exactly one relay attempt; failures and timeouts are recorded, never
    // surfaced to the webhook sender and never retried.
    let send = state.relay().send_message(state.room_id(), &message);
    match tokio::time::timeout(state.relay_timeout(), send).await {
        Ok(Ok(())) => {
            state.metrics().record_relayed();
            info!(
                ?delivery,
                event_type = %event_type,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "event relayed"
            );
        }
        Ok(Err(error)) => {
            state.metrics().record_relay_failed();
            warn!(?delivery, event_type = %event_type, %error, "relay failed");
        }
        Err(_) => {
            let error = RelayError::Timeout(state.relay_timeout());
            state.metrics().record_relay_failed();
            warn!(?delivery, event_type = %event_type, %error, "relay timed out");
        }
    }

    state.metrics().record_latency(started.elapsed());
    Ok((StatusCode::OK, BODY_PROCESSED))
}

/// Extracts an optional header value as an owned string.
fn optional_header(headers: &HeaderMap, name: &'static str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
