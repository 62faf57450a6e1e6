//! Shared test doubles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::relay::{ChatRelay, Message, RelayError};
use crate::types::RoomId;

/// An in-memory [`ChatRelay`] that records sends and serves canned messages.
#[derive(Clone, Default)]
pub struct FakeRelay {
    sent: Arc<Mutex<Vec<(RoomId, String)>>>,
    messages: Arc<Mutex<HashMap<String, Message>>>,
    fail_sends: bool,
}

impl FakeRelay {
    /// A relay whose every send fails with an API error.
    pub fn failing() -> Self {
        FakeRelay {
            fail_sends: true,
            ..Default::default()
        }
    }

    /// Registers a message to be returned by `get_message`.
    pub fn with_message(self, message: Message) -> Self {
        self.messages
            .lock()
            .unwrap()
            .insert(message.id.clone(), message);
        self
    }

    /// Returns all messages sent through this relay, in order.
    pub fn sent(&self) -> Vec<(RoomId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl ChatRelay for FakeRelay {
    async fn send_message(&self, room: &RoomId, markdown: &str) -> Result<(), RelayError> {
        if self.fail_sends {
            return Err(RelayError::Api {
                status: 503,
                body: "injected failure".to_string(),
            });
        }

        self.sent
            .lock()
            .unwrap()
            .push((room.clone(), markdown.to_string()));
        Ok(())
    }

    async fn get_message(&self, message_id: &str) -> Result<Message, RelayError> {
        self.messages
            .lock()
            .unwrap()
            .get(message_id)
            .cloned()
            .ok_or(RelayError::Api {
                status: 404,
                body: "message not found".to_string(),
            })
    }
}
