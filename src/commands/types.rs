//! Command types for chat-bot commands.

use std::fmt;

/// A parsed bot command from a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Liveness check: `@{bot_name} ping`
    ///
    /// The bot replies with `pong` in the same room.
    Ping,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Ping => write!(f, "ping"),
        }
    }
}
