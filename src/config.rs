//! Environment-sourced configuration.
//!
//! All configuration comes from environment variables, read once at startup.
//! Required values fail fast with an error naming the variable, rather than
//! failing per-request later. Secrets are wrapped in [`SecretString`] so they
//! are redacted from `Debug` output and never logged.

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::types::RoomId;

/// Default HTTP listen port.
const DEFAULT_PORT: u16 = 3000;

/// Default webhook body cap (10 MiB).
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default bound on the relay call, in seconds.
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 10;

/// Default bot mention name.
const DEFAULT_BOT_NAME: &str = "github-relay";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue {
        /// The variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Process-wide configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`).
    pub port: u16,

    /// Webex bot token (`WEBEX_TOKEN`).
    pub webex_token: SecretString,

    /// Shared HMAC key for webhook signatures (`GITHUB_SECRET`).
    pub github_secret: SecretString,

    /// Destination room for relayed events (`ROOM_ID`).
    pub room_id: RoomId,

    /// Mention name the bot answers to (`BOT_NAME`).
    pub bot_name: String,

    /// The bot's own email address (`WEBEX_BOT_EMAIL`), used to ignore its
    /// own messages. Unset disables the check.
    pub bot_email: Option<String>,

    /// Maximum accepted webhook body size (`MAX_BODY_BYTES`).
    pub max_body_bytes: usize,

    /// Bound on each relay call (`RELAY_TIMEOUT_SECS`).
    pub relay_timeout: Duration,

    /// Whether structurally incomplete events are rejected with 400
    /// (`STRICT_EVENTS`). When false they are acknowledged with 200.
    pub strict_events: bool,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Factored out of [`Config::from_env`] so tests can supply variables
    /// without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Config {
            port: parsed_or(&lookup, "PORT", DEFAULT_PORT)?,
            webex_token: SecretString::new(required(&lookup, "WEBEX_TOKEN")?),
            github_secret: SecretString::new(required(&lookup, "GITHUB_SECRET")?),
            room_id: RoomId::new(required(&lookup, "ROOM_ID")?),
            bot_name: lookup("BOT_NAME").unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
            bot_email: lookup("WEBEX_BOT_EMAIL"),
            max_body_bytes: parsed_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            relay_timeout: Duration::from_secs(parsed_or(
                &lookup,
                "RELAY_TIMEOUT_SECS",
                DEFAULT_RELAY_TIMEOUT_SECS,
            )?),
            strict_events: parsed_or(&lookup, "STRICT_EVENTS", true)?,
        })
    }
}

/// Returns the value of a required variable, or [`ConfigError::MissingVar`].
fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

/// Parses an optional variable, falling back to a default when unset.
fn parsed_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name,
            value,
        }),
    }
}
