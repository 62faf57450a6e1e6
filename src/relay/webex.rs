//! Webex REST API client.
//!
//! A thin client over the two Webex endpoints the relay uses:
//!
//! - `POST /v1/messages` to post a markdown message to a room
//! - `GET /v1/messages/{id}` to fetch a message's text (message webhooks
//!   only carry the message ID)
//!
//! Authentication is a bot bearer token. The Webex API uses camelCase JSON
//! field names.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ChatRelay, Message, RelayError};
use crate::types::RoomId;

/// Production Webex API base URL.
const DEFAULT_BASE_URL: &str = "https://webexapis.com/v1";

/// Connect/read timeout applied to every API request.
///
/// This is a transport-level bound; the dispatcher applies its own overall
/// deadline around the relay call.
const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// A Webex REST API client.
///
/// Cheap to clone: the underlying connection pool is shared between clones.
#[derive(Clone)]
pub struct WebexClient {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl WebexClient {
    /// Creates a client for the production Webex API.
    pub fn new(token: SecretString) -> Result<Self, RelayError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL.
    ///
    /// Used by tests to point the client at a local mock server.
    pub fn with_base_url(token: SecretString, base_url: impl Into<String>) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

        Ok(WebexClient {
            http,
            base_url: base_url.into(),
            token,
        })
    }
}

/// Request body for `POST /v1/messages`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageRequest<'a> {
    room_id: &'a str,
    markdown: &'a str,
}

/// Response body for `GET /v1/messages/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    id: String,
    room_id: String,
    text: Option<String>,
    person_email: Option<String>,
}

impl From<RawMessage> for Message {
    fn from(raw: RawMessage) -> Self {
        Message {
            id: raw.id,
            room_id: RoomId::new(raw.room_id),
            text: raw.text,
            person_email: raw.person_email,
        }
    }
}

/// Converts a non-success response into [`RelayError::Api`].
async fn api_error(response: reqwest::Response) -> RelayError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    RelayError::Api { status, body }
}

impl ChatRelay for WebexClient {
    async fn send_message(&self, room: &RoomId, markdown: &str) -> Result<(), RelayError> {
        let response = self
            .http
            .post(format!("{}/messages", self.base_url))
            .bearer_auth(self.token.expose_secret())
            .json(&CreateMessageRequest {
                room_id: room.as_str(),
                markdown,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    async fn get_message(&self, message_id: &str) -> Result<Message, RelayError> {
        let response = self
            .http
            .get(format!("{}/messages/{}", self.base_url, message_id))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let raw: RawMessage = response.json().await?;
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> WebexClient {
        WebexClient::with_base_url(SecretString::new("test-token".to_string()), base_url).unwrap()
    }

    #[tokio::test]
    async fn send_message_posts_camel_case_body_with_bearer_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({
                "roomId": "room-1",
                "markdown": "hello **world**"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg-1",
                "roomId": "room-1",
                "text": "hello world"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .send_message(&RoomId::new("room-1"), "hello **world**")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn send_message_maps_api_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(404).set_body_string("roomId not found"))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .send_message(&RoomId::new("missing-room"), "text")
            .await;

        match result {
            Err(RelayError::Api { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "roomId not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_message_parses_camel_case_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/messages/msg-42"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg-42",
                "roomId": "room-7",
                "text": "@bot ping",
                "personEmail": "alice@example.com"
            })))
            .mount(&server)
            .await;

        let message = client(&server.uri()).get_message("msg-42").await.unwrap();

        assert_eq!(message.id, "msg-42");
        assert_eq!(message.room_id, RoomId::new("room-7"));
        assert_eq!(message.text.as_deref(), Some("@bot ping"));
        assert_eq!(message.person_email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn get_message_tolerates_missing_optional_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/messages/msg-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg-1",
                "roomId": "room-1"
            })))
            .mount(&server)
            .await;

        let message = client(&server.uri()).get_message("msg-1").await.unwrap();

        assert_eq!(message.text, None);
        assert_eq!(message.person_email, None);
    }
}
