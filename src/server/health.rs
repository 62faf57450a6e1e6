//! Health check endpoint.
//!
//! Returns a small JSON payload describing the service. Intended for load
//! balancers, uptime checks, and humans confirming the relay is up.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is able to answer at all.
    pub status: &'static str,

    /// Human-readable service description.
    pub message: &'static str,

    /// Server time at the moment of the request (RFC 3339).
    pub timestamp: DateTime<Utc>,

    /// The endpoints this service exposes.
    pub endpoints: HealthEndpoints,
}

/// Endpoint listing included in the health payload.
#[derive(Debug, Serialize)]
pub struct HealthEndpoints {
    pub github: &'static str,
    pub webex: &'static str,
}

/// Health check handler.
///
/// # Example
///
/// ```ignore
/// GET / HTTP/1.1
///
/// HTTP/1.1 200 OK
/// Content-Type: application/json
///
/// {"status":"ok","message":"GitHub webhook relay is running","timestamp":"...","endpoints":{...}}
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "GitHub webhook relay is running",
        timestamp: Utc::now(),
        endpoints: HealthEndpoints {
            github: "/github",
            webex: "/webex",
        },
    })
}
