//! Formatting of typed events into relay messages.
//!
//! Pure string construction: no side effects, no I/O, deterministic. One
//! template per event kind; the output is markdown-flavored text suitable
//! for a Webex message body.

use super::events::GitHubEvent;

/// Fallback rendered when a push payload carries no pusher name.
const UNKNOWN_PUSHER: &str = "unknown";

/// Formats a typed event into the message relayed to the chat room.
///
/// # Examples
///
/// ```
/// use github_webex_relay::webhooks::{format_event, GitHubEvent, PushEvent};
///
/// let event = GitHubEvent::Push(PushEvent {
///     commit_count: 2,
///     ref_name: "refs/heads/main".to_string(),
///     pusher: Some("alice".to_string()),
///     compare_url: "u".to_string(),
/// });
///
/// assert_eq!(
///     format_event(&event),
///     "Push Event: 2 commits pushed to refs/heads/main by alice. Compare: u"
/// );
/// ```
pub fn format_event(event: &GitHubEvent) -> String {
    match event {
        GitHubEvent::Push(push) => format!(
            "Push Event: {} commits pushed to {} by {}. Compare: {}",
            push.commit_count,
            push.ref_name,
            push.pusher.as_deref().unwrap_or(UNKNOWN_PUSHER),
            push.compare_url,
        ),
        GitHubEvent::PullRequest(pr) => format!(
            "Pull Request {}: #{} \"{}\" by {}. URL: {}",
            pr.action, pr.number, pr.title, pr.author, pr.url,
        ),
        GitHubEvent::Issue(issue) => format!(
            "Issue {}: #{} \"{}\" by {}. URL: {}",
            issue.action, issue.number, issue.title, issue.author, issue.url,
        ),
    }
}
