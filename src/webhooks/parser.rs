//! GitHub webhook payload parser.
//!
//! This module parses raw webhook JSON payloads into typed [`GitHubEvent`]
//! values. The parser is robust against unknown fields and event types.
//!
//! # Parsing Strategy
//!
//! 1. The event type is determined from the `X-GitHub-Event` header
//! 2. The payload is parsed according to the event type
//! 3. Unknown event types return `Ok(None)` (acknowledged, not relayed)
//! 4. A declared event type whose payload lacks the expected nested structure
//!    (e.g., a `pull_request` event with no `pull_request` object) returns
//!    `Err`; the dispatcher decides whether to reject or acknowledge it

use serde::Deserialize;
use thiserror::Error;

use super::events::{GitHubEvent, IssueEvent, PullRequestEvent, PushEvent};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is missing required structure for its declared event type.
    #[error("payload does not match event type: {0}")]
    IncompleteEvent(#[from] serde_json::Error),
}

/// Parses a webhook payload into a typed event.
///
/// # Arguments
///
/// * `event_type` - The value of the `X-GitHub-Event` header
/// * `payload` - The raw JSON payload bytes
///
/// # Returns
///
/// * `Ok(Some(event))` - Successfully parsed a known event type
/// * `Ok(None)` - Unknown event type (not an error)
/// * `Err(e)` - Payload lacks fields required for its declared event type
///
/// # Examples
///
/// ```
/// use github_webex_relay::webhooks::parse_webhook;
///
/// let payload = br#"{
///     "action": "opened",
///     "issue": { "number": 7, "title": "Fix", "html_url": "h" },
///     "sender": { "login": "bob" }
/// }"#;
///
/// assert!(parse_webhook("issues", payload).unwrap().is_some());
/// assert!(parse_webhook("deployment", payload).unwrap().is_none());
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<GitHubEvent>, ParseError> {
    match event_type {
        "push" => parse_push(payload).map(|e| Some(GitHubEvent::Push(e))),
        "pull_request" => parse_pull_request(payload).map(|e| Some(GitHubEvent::PullRequest(e))),
        "issues" => parse_issues(payload).map(|e| Some(GitHubEvent::Issue(e))),
        // Unknown event types are ignored (not an error)
        _ => Ok(None),
    }
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match GitHub's webhook JSON structure. Fields that may legitimately
// be absent are Option<T>; everything else is required and its absence is a
// parse error.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawSender {
    login: String,
}

// ============================================================================
// push event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPushPayload {
    commits: Vec<serde_json::Value>,
    #[serde(rename = "ref")]
    ref_name: String,
    pusher: Option<RawPusher>,
    compare: String,
}

#[derive(Debug, Deserialize)]
struct RawPusher {
    name: Option<String>,
}

fn parse_push(payload: &[u8]) -> Result<PushEvent, ParseError> {
    let raw: RawPushPayload = serde_json::from_slice(payload)?;

    Ok(PushEvent {
        commit_count: raw.commits.len(),
        ref_name: raw.ref_name,
        pusher: raw.pusher.and_then(|p| p.name),
        compare_url: raw.compare,
    })
}

// ============================================================================
// pull_request event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: String,
    number: u64,
    pull_request: RawPullRequest,
    sender: RawSender,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    title: String,
    html_url: String,
}

fn parse_pull_request(payload: &[u8]) -> Result<PullRequestEvent, ParseError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;

    Ok(PullRequestEvent {
        action: raw.action,
        number: raw.number,
        title: raw.pull_request.title,
        author: raw.sender.login,
        url: raw.pull_request.html_url,
    })
}

// ============================================================================
// issues event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawIssuesPayload {
    action: String,
    issue: RawIssue,
    sender: RawSender,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    html_url: String,
}

fn parse_issues(payload: &[u8]) -> Result<IssueEvent, ParseError> {
    let raw: RawIssuesPayload = serde_json::from_slice(payload)?;

    Ok(IssueEvent {
        action: raw.action,
        number: raw.issue.number,
        title: raw.issue.title,
        author: raw.sender.login,
        url: raw.issue.html_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bytes(v: &serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(v).unwrap()
    }

    #[test]
    fn parses_push() {
        let payload = json!({
            "ref": "refs/heads/main",
            "commits": [{"id": "a"}, {"id": "b"}],
            "pusher": {"name": "alice"},
            "compare": "https://github.com/o/r/compare/abc...def"
        });

        let event = parse_webhook("push", &bytes(&payload)).unwrap().unwrap();
        let GitHubEvent::Push(push) = event else {
            panic!("expected push event");
        };

        assert_eq!(push.commit_count, 2);
        assert_eq!(push.ref_name, "refs/heads/main");
        assert_eq!(push.pusher.as_deref(), Some("alice"));
        assert_eq!(push.compare_url, "https://github.com/o/r/compare/abc...def");
    }

    #[test]
    fn parses_push_without_pusher() {
        let payload = json!({
            "ref": "refs/heads/x",
            "commits": [],
            "compare": "u"
        });

        let event = parse_webhook("push", &bytes(&payload)).unwrap().unwrap();
        let GitHubEvent::Push(push) = event else {
            panic!("expected push event");
        };

        assert_eq!(push.commit_count, 0);
        assert_eq!(push.pusher, None);
    }

    #[test]
    fn parses_push_with_pusher_missing_name() {
        let payload = json!({
            "ref": "refs/heads/x",
            "commits": [],
            "pusher": {"email": "a@example.com"},
            "compare": "u"
        });

        let event = parse_webhook("push", &bytes(&payload)).unwrap().unwrap();
        let GitHubEvent::Push(push) = event else {
            panic!("expected push event");
        };

        assert_eq!(push.pusher, None);
    }

    #[test]
    fn parses_pull_request() {
        let payload = json!({
            "action": "opened",
            "number": 7,
            "pull_request": {"title": "Fix", "html_url": "h"},
            "sender": {"login": "bob"}
        });

        let event = parse_webhook("pull_request", &bytes(&payload)).unwrap().unwrap();
        let GitHubEvent::PullRequest(pr) = event else {
            panic!("expected pull_request event");
        };

        assert_eq!(pr.action, "opened");
        assert_eq!(pr.number, 7);
        assert_eq!(pr.title, "Fix");
        assert_eq!(pr.author, "bob");
        assert_eq!(pr.url, "h");
    }

    #[test]
    fn parses_issues() {
        let payload = json!({
            "action": "closed",
            "issue": {"number": 42, "title": "Bug", "html_url": "h"},
            "sender": {"login": "carol"}
        });

        let event = parse_webhook("issues", &bytes(&payload)).unwrap().unwrap();
        let GitHubEvent::Issue(issue) = event else {
            panic!("expected issues event");
        };

        assert_eq!(issue.action, "closed");
        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Bug");
        assert_eq!(issue.author, "carol");
    }

    #[test]
    fn unknown_event_type_is_ignored() {
        let payload = json!({"anything": "at all"});

        assert!(parse_webhook("deployment", &bytes(&payload)).unwrap().is_none());
        assert!(parse_webhook("workflow_run", &bytes(&payload)).unwrap().is_none());
        assert!(parse_webhook("", &bytes(&payload)).unwrap().is_none());
    }

    #[test]
    fn pull_request_event_without_pull_request_object_is_an_error() {
        // Declared as pull_request but missing the nested object
        let payload = json!({
            "action": "opened",
            "number": 7,
            "sender": {"login": "bob"}
        });

        let result = parse_webhook("pull_request", &bytes(&payload));
        assert!(matches!(result, Err(ParseError::IncompleteEvent(_))));
    }

    #[test]
    fn issues_event_without_sender_is_an_error() {
        let payload = json!({
            "action": "opened",
            "issue": {"number": 1, "title": "t", "html_url": "u"}
        });

        let result = parse_webhook("issues", &bytes(&payload));
        assert!(matches!(result, Err(ParseError::IncompleteEvent(_))));
    }

    #[test]
    fn push_event_without_commits_is_an_error() {
        let payload = json!({
            "ref": "refs/heads/main",
            "compare": "u"
        });

        let result = parse_webhook("push", &bytes(&payload));
        assert!(matches!(result, Err(ParseError::IncompleteEvent(_))));
    }
}
