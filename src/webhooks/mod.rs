//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Parsing of raw payloads into typed events
//! - Formatting of typed events into relay messages

pub mod events;
pub mod format;
pub mod parser;
pub mod signature;

pub use events::{GitHubEvent, IssueEvent, PullRequestEvent, PushEvent};
pub use format::format_event;
pub use parser::{parse_webhook, ParseError};
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
