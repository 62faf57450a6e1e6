//! Typed GitHub webhook events.
//!
//! Each variant carries only the fields needed to format a relay message.
//! The variant is determined solely by the `X-GitHub-Event` header, never
//! guessed from the payload shape. Event types the relay does not handle are
//! represented by the parser returning `None`, not by a variant here.

/// A parsed GitHub webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEvent {
    /// Commits were pushed to a ref.
    Push(PushEvent),

    /// A pull request was opened, closed, edited, etc.
    PullRequest(PullRequestEvent),

    /// An issue was opened, closed, labeled, etc.
    ///
    /// GitHub delivers these under the event type `issues` (plural).
    Issue(IssueEvent),
}

impl GitHubEvent {
    /// Returns the GitHub event type string this variant corresponds to.
    pub fn kind(&self) -> &'static str {
        match self {
            GitHubEvent::Push(_) => "push",
            GitHubEvent::PullRequest(_) => "pull_request",
            GitHubEvent::Issue(_) => "issues",
        }
    }
}

/// A `push` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    /// Number of commits in the push.
    pub commit_count: usize,

    /// The full ref that was pushed to (e.g., "refs/heads/main").
    pub ref_name: String,

    /// The pusher's name, if the payload carried one.
    pub pusher: Option<String>,

    /// URL comparing the ref before and after the push.
    pub compare_url: String,
}

/// A `pull_request` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// The action that triggered this event (e.g., "opened", "closed").
    ///
    /// Kept as the raw string: every action is relayed verbatim.
    pub action: String,

    /// The PR number.
    pub number: u64,

    /// The PR title.
    pub title: String,

    /// Login of the user whose activity triggered the event.
    pub author: String,

    /// The PR's HTML URL.
    pub url: String,
}

/// An `issues` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEvent {
    /// The action that triggered this event (e.g., "opened", "closed").
    pub action: String,

    /// The issue number.
    pub number: u64,

    /// The issue title.
    pub title: String,

    /// Login of the user whose activity triggered the event.
    pub author: String,

    /// The issue's HTML URL.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_github_event_types() {
        let push = GitHubEvent::Push(PushEvent {
            commit_count: 0,
            ref_name: "refs/heads/main".to_string(),
            pusher: None,
            compare_url: "u".to_string(),
        });
        assert_eq!(push.kind(), "push");

        let issue = GitHubEvent::Issue(IssueEvent {
            action: "opened".to_string(),
            number: 1,
            title: "t".to_string(),
            author: "a".to_string(),
            url: "u".to_string(),
        });
        assert_eq!(issue.kind(), "issues");
    }
}
