//! Chat-bot session.
//!
//! The session is the long-lived chat side of the relay: it owns the bot's
//! identity (mention name, own email address) and answers commands parsed
//! from room messages. It is constructed explicitly and injected wherever
//! it is needed, so tests can drive it against a fake relay.
//!
//! The session does not own a websocket. Inbound messages arrive through
//! Webex message webhooks (see `server::messages`); the session only decides
//! whether and how to respond.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::commands::{parse_command, Command};
use crate::relay::{ChatRelay, RelayError};
use crate::types::RoomId;

/// Reply sent for [`Command::Ping`].
const PONG: &str = "pong";

/// A chat-bot session bound to a relay.
///
/// Clones share the same cancellation token, so `shutdown` on any clone
/// stops the session everywhere.
#[derive(Clone)]
pub struct Session<R> {
    relay: R,
    bot_name: String,
    bot_email: Option<String>,
    cancel: CancellationToken,
}

impl<R: ChatRelay> Session<R> {
    /// Creates a new session.
    ///
    /// # Arguments
    ///
    /// * `relay` - The chat backend used for replies
    /// * `bot_name` - The mention name the bot answers to (without `@`)
    /// * `bot_email` - The bot's own address; messages from it are ignored
    pub fn new(relay: R, bot_name: impl Into<String>, bot_email: Option<String>) -> Self {
        Session {
            relay,
            bot_name: bot_name.into(),
            bot_email,
            cancel: CancellationToken::new(),
        }
    }

    /// Marks the session as started.
    pub fn start(&self) {
        info!(bot_name = %self.bot_name, "chat session started");
    }

    /// Requests shutdown of everything tied to this session's token.
    pub fn shutdown(&self) {
        info!(bot_name = %self.bot_name, "chat session shutting down");
        self.cancel.cancel();
    }

    /// Returns the token cancelled by [`Session::shutdown`].
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns true when the message came from the bot itself.
    ///
    /// Without a configured bot email this check is disabled; the bot then
    /// relies on its own messages not containing a self-mention.
    pub fn is_own_message(&self, sender_email: Option<&str>) -> bool {
        match (&self.bot_email, sender_email) {
            (Some(own), Some(sender)) => own.eq_ignore_ascii_case(sender),
            _ => false,
        }
    }

    /// Handles an inbound room message.
    ///
    /// Ignores the bot's own messages, parses a command from the text, and
    /// replies in the same room. Returns the command that was answered, or
    /// `None` when the message was ignored.
    pub async fn handle_message(
        &self,
        room: &RoomId,
        sender_email: Option<&str>,
        text: &str,
    ) -> Result<Option<Command>, RelayError> {
        if self.is_own_message(sender_email) {
            debug!(%room, "ignoring own message");
            return Ok(None);
        }

        let Some(command) = parse_command(text, &self.bot_name) else {
            debug!(%room, "message contains no command");
            return Ok(None);
        };

        info!(%room, %command, "answering command");
        match command {
            Command::Ping => self.relay.send_message(room, PONG).await?,
        }

        Ok(Some(command))
    }
}
