use serde::{Deserialize, Serialize};

/// Repository reference attached to every public event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
}

/// One record from the GitHub public events feed, as delivered.
///
/// The payload is kept untyped until the event survives filtering and
/// limiting, so a malformed event that is never rendered cannot fail a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: String,
    pub repo: Repo,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Event kinds that have a registered serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    IssueComment,
    Issues,
    Fork,
    Gollum,
    Release,
    PullRequest,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::IssueComment,
        EventKind::Issues,
        EventKind::Fork,
        EventKind::Gollum,
        EventKind::Release,
        EventKind::PullRequest,
    ];

    /// Look up the kind for a feed `type` tag. `None` means no serializer.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "IssueCommentEvent" => Some(Self::IssueComment),
            "IssuesEvent" => Some(Self::Issues),
            "ForkEvent" => Some(Self::Fork),
            "GollumEvent" => Some(Self::Gollum),
            "ReleaseEvent" => Some(Self::Release),
            "PullRequestEvent" => Some(Self::PullRequest),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::IssueComment => "IssueCommentEvent",
            Self::Issues => "IssuesEvent",
            Self::Fork => "ForkEvent",
            Self::Gollum => "GollumEvent",
            Self::Release => "ReleaseEvent",
            Self::PullRequest => "PullRequestEvent",
        }
    }
}

impl ActivityEvent {
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_tag(&self.event_type)
    }
}
