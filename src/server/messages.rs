//! Webex message-webhook endpoint handler.
//!
//! Webex notifies the bot of new room messages by POSTing a webhook envelope
//! to `POST /webex`. The envelope carries only the message ID, so the handler
//! fetches the message text through the relay before handing it to the chat
//! session.
//!
//! Failures after the envelope is accepted (fetch errors, reply errors) are
//! logged and acknowledged with 200 so Webex does not disable the webhook.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, warn};

use super::AppState;
use crate::relay::ChatRelay;
use crate::types::RoomId;

/// Response body for messages that produced a reply.
const BODY_PROCESSED: &str = "Message processed";
/// Response body for messages that were ignored.
const BODY_RECEIVED: &str = "Message received";

/// The Webex webhook envelope for a message event.
#[derive(Debug, Deserialize)]
pub struct WebexEnvelope {
    data: WebexMessageData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebexMessageData {
    id: String,
    room_id: String,
    person_email: Option<String>,
}

/// Webex message-webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Body: Webex webhook envelope; only `data.id`, `data.roomId`, and
///   `data.personEmail` are used
///
/// # Response
///
/// - 200 `Message processed`: A command was answered
/// - 200 `Message received`: Message ignored (own message, no command, or
///   the message could not be fetched or answered)
/// - 400/422: Malformed envelope (extractor rejection)
pub async fn message_handler<R: ChatRelay>(
    State(state): State<AppState<R>>,
    Json(envelope): Json<WebexEnvelope>,
) -> (StatusCode, &'static str) {
    let data = envelope.data;
    let room = RoomId::new(data.room_id);

    // Short-circuit on the envelope's sender before fetching the message.
    if state.session().is_own_message(data.person_email.as_deref()) {
        debug!(%room, "ignoring own message notification");
        return (StatusCode::OK, BODY_RECEIVED);
    }

    let message = match state.relay().get_message(&data.id).await {
        Ok(message) => message,
        Err(error) => {
            warn!(%room, message_id = %data.id, %error, "failed to fetch notified message");
            return (StatusCode::OK, BODY_RECEIVED);
        }
    };

    let text = message.text.as_deref().unwrap_or_default();
    match state
        .session()
        .handle_message(&room, message.person_email.as_deref(), text)
        .await
    {
        Ok(Some(_)) => (StatusCode::OK, BODY_PROCESSED),
        Ok(None) => (StatusCode::OK, BODY_RECEIVED),
        Err(error) => {
            warn!(%room, %error, "failed to answer command");
            (StatusCode::OK, BODY_RECEIVED)
        }
    }
}
