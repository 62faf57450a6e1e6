//! GitHub → Webex relay bot.
//!
//! This library receives GitHub webhook deliveries over HTTP, verifies their
//! HMAC-SHA256 signatures, formats a human-readable summary per event kind,
//! and relays that summary into a Webex room. It also hosts a small chat-bot
//! session that answers a trivial command when mentioned in a room.

pub mod bot;
pub mod commands;
pub mod config;
pub mod metrics;
pub mod relay;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
pub mod test_utils;
