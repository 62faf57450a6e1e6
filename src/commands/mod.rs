//! Command parsing for chat-bot commands.
//!
//! Users interact with the bot by mentioning it in a Webex room. The parser
//! extracts a structured command from unstructured message text.
//!
//! # Supported Commands
//!
//! - `@{bot_name} ping` - Replies with `pong`, a liveness check for the bot
//!
//! # Example
//!
//! ```
//! use github_webex_relay::commands::{parse_command, Command};
//!
//! assert_eq!(parse_command("@github-relay ping", "github-relay"), Some(Command::Ping));
//! assert_eq!(parse_command("no mention here", "github-relay"), None);
//! ```

mod parser;
mod types;

pub use parser::parse_command;
pub use types::Command;
