//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different ID types (e.g., using a
//! Webex room ID where a GitHub delivery ID is expected) and make the code
//! more self-documenting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Webex room identifier.
///
/// Rooms are the destination of relayed messages. The value is an opaque
/// token issued by Webex; no format validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Creates a new room ID from a string.
    pub fn new(s: impl Into<String>) -> Self {
        RoomId(s.into())
    }

    /// Returns the room ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        RoomId(s)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        RoomId(s.to_string())
    }
}

/// A GitHub webhook delivery identifier (`X-GitHub-Delivery` header).
///
/// GitHub assigns a unique ID to each delivery attempt. The relay only uses
/// it for log correlation, so the header is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(pub String);

impl DeliveryId {
    /// Creates a new delivery ID from a string.
    pub fn new(s: impl Into<String>) -> Self {
        DeliveryId(s.into())
    }

    /// Returns the delivery ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeliveryId {
    fn from(s: String) -> Self {
        DeliveryId(s)
    }
}

impl From<&str> for DeliveryId {
    fn from(s: &str) -> Self {
        DeliveryId(s.to_string())
    }
}
