//! Outbound chat relay.
//!
//! The relay is the seam between webhook processing and the chat backend.
//! [`ChatRelay`] abstracts the two operations the rest of the crate needs:
//! sending a markdown message to a room, and fetching a message by ID (Webex
//! message webhooks do not carry the message text). [`WebexClient`] is the
//! production implementation; tests substitute a fake.
//!
//! Delivery is at-most-once: callers make exactly one send attempt per
//! webhook and never retry, since GitHub redelivers with at-least-once
//! semantics and a retry here would duplicate messages.

use std::future::Future;

use thiserror::Error;

use crate::types::RoomId;

pub mod webex;

pub use webex::WebexClient;

/// Errors from the chat backend.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The HTTP request could not be completed (connect, TLS, body read).
    #[error("relay transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The chat API answered with a non-success status.
    #[error("chat API returned {status}: {body}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, for log context.
        body: String,
    },

    /// The relay call exceeded the configured deadline.
    #[error("relay call timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// A chat message, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Backend-assigned message ID.
    pub id: String,

    /// The room the message was posted in.
    pub room_id: RoomId,

    /// Plain-text body. Absent for attachment-only messages.
    pub text: Option<String>,

    /// Email address of the sender, when the backend provides one.
    pub person_email: Option<String>,
}

/// Operations the relay needs from a chat backend.
///
/// Futures must be `Send` so handlers can await them from any runtime worker.
///
/// # Example (fake for testing)
///
/// ```ignore
/// #[derive(Clone, Default)]
/// struct FakeRelay {
///     sent: Arc<Mutex<Vec<(RoomId, String)>>>,
/// }
///
/// impl ChatRelay for FakeRelay {
///     async fn send_message(&self, room: &RoomId, markdown: &str) -> Result<(), RelayError> {
///         self.sent.lock().unwrap().push((room.clone(), markdown.to_string()));
///         Ok(())
///     }
///
///     async fn get_message(&self, _message_id: &str) -> Result<Message, RelayError> {
///         Err(RelayError::Api { status: 404, body: String::new() })
///     }
/// }
/// ```
pub trait ChatRelay {
    /// Posts a markdown message to a room.
    fn send_message(
        &self,
        room: &RoomId,
        markdown: &str,
    ) -> impl Future<Output = Result<(), RelayError>> + Send;

    /// Fetches a message by its backend ID.
    fn get_message(
        &self,
        message_id: &str,
    ) -> impl Future<Output = Result<Message, RelayError>> + Send;
}
