//! Serializer registry: one formatter per recognized event kind.
//!
//! Each recognized kind decodes into an [`Activity`] variant that carries only
//! the fields its formatter reads. Decoding is strict: a recognized event that
//! lacks a required field yields a [`FormatError`] and fails the run.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::event::{ActivityEvent, EventKind};

/// A recognized event with a required field missing or of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub event_type: String,
    pub created_at: String,
    pub message: String,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "malformed {} payload ({}): {}",
            self.event_type, self.created_at, self.message
        )
    }
}

impl std::error::Error for FormatError {}

/// Decoded form of an event, one variant per serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    IssueComment {
        created_at: String,
        repo: String,
        number: u64,
    },
    IssueStateChange {
        created_at: String,
        repo: String,
        action: String,
        number: u64,
    },
    Fork {
        created_at: String,
        repo: String,
    },
    WikiUpdate {
        created_at: String,
        repo: String,
    },
    Release {
        created_at: String,
        repo: String,
        tag_name: String,
        prerelease: bool,
    },
    PullRequest {
        created_at: String,
        repo: String,
        action: String,
        number: u64,
        merged: bool,
    },
    /// No serializer is registered for this tag; dropped by the filter.
    Unrecognized { event_type: String },
}

#[derive(Deserialize)]
struct IssueRef {
    number: u64,
}

#[derive(Deserialize)]
struct IssueCommentPayload {
    issue: IssueRef,
}

#[derive(Deserialize)]
struct IssuesPayload {
    action: String,
    issue: IssueRef,
}

#[derive(Deserialize)]
struct ReleaseRef {
    tag_name: String,
    #[serde(default)]
    prerelease: bool,
}

#[derive(Deserialize)]
struct ReleasePayload {
    release: ReleaseRef,
}

#[derive(Deserialize)]
struct PullRequestRef {
    number: u64,
    #[serde(default)]
    merged: bool,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    action: String,
    pull_request: PullRequestRef,
}

fn decode_payload<T: DeserializeOwned>(event: &ActivityEvent) -> Result<T, FormatError> {
    T::deserialize(&event.payload).map_err(|e| FormatError {
        event_type: event.event_type.clone(),
        created_at: event.created_at.clone(),
        message: e.to_string(),
    })
}

impl Activity {
    /// Decode the payload fields the matching serializer needs.
    pub fn decode(event: &ActivityEvent) -> Result<Self, FormatError> {
        let created_at = event.created_at.clone();
        let repo = event.repo.name.clone();

        let Some(kind) = event.kind() else {
            return Ok(Self::Unrecognized {
                event_type: event.event_type.clone(),
            });
        };

        let activity = match kind {
            EventKind::IssueComment => {
                let p: IssueCommentPayload = decode_payload(event)?;
                Self::IssueComment {
                    created_at,
                    repo,
                    number: p.issue.number,
                }
            },
            EventKind::Issues => {
                let p: IssuesPayload = decode_payload(event)?;
                Self::IssueStateChange {
                    created_at,
                    repo,
                    action: p.action,
                    number: p.issue.number,
                }
            },
            EventKind::Fork => Self::Fork { created_at, repo },
            EventKind::Gollum => Self::WikiUpdate { created_at, repo },
            EventKind::Release => {
                let p: ReleasePayload = decode_payload(event)?;
                Self::Release {
                    created_at,
                    repo,
                    tag_name: p.release.tag_name,
                    prerelease: p.release.prerelease,
                }
            },
            EventKind::PullRequest => {
                let p: PullRequestPayload = decode_payload(event)?;
                Self::PullRequest {
                    created_at,
                    repo,
                    action: p.action,
                    number: p.pull_request.number,
                    merged: p.pull_request.merged,
                }
            },
        };
        Ok(activity)
    }

    /// Render the single summary line, or `None` for unrecognized events.
    pub fn summary(&self) -> Option<String> {
        let line = match self {
            Self::IssueComment {
                created_at,
                repo,
                number,
            } => format!("🗣 ({created_at}) Commented on #{number} in {repo}"),
            Self::IssueStateChange {
                created_at,
                repo,
                action,
                number,
            } => format!(
                "❗️ ({created_at}) {} issue #{number} in {repo}",
                capitalize(action)
            ),
            Self::Fork { created_at, repo } => format!("🍴 ({created_at}) Forked {repo}"),
            Self::WikiUpdate { created_at, repo } => {
                format!("📜 ({created_at}) Updated {repo}'s Wiki")
            },
            Self::Release {
                created_at,
                repo,
                tag_name,
                prerelease,
            } => {
                let label = if *prerelease { "Pre-Released" } else { "Released" };
                format!("📣 ({created_at}) {label} {repo} {tag_name}")
            },
            Self::PullRequest {
                created_at,
                repo,
                action,
                number,
                merged,
            } => {
                let (emote, label) = if *merged {
                    ("🎉", "Merged".to_string())
                } else if action == "opened" {
                    ("💪", capitalize(action))
                } else {
                    ("❌", capitalize(action))
                };
                format!(
                    "{emote} {} {label} PR #{number} in {repo}",
                    parenthesize(created_at)
                )
            },
            Self::Unrecognized { .. } => return None,
        };
        Some(line)
    }
}

/// Decode and render one event in a single step.
pub fn serialize_event(event: &ActivityEvent) -> Result<Option<String>, FormatError> {
    Ok(Activity::decode(event)?.summary())
}

/// Uppercase the first character, leaving the remainder untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wrap a timestamp in parentheses unless it already starts or ends with one.
fn parenthesize(ts: &str) -> String {
    let mut out = String::with_capacity(ts.len() + 2);
    if !ts.starts_with('(') {
        out.push('(');
    }
    out.push_str(ts);
    if !out.ends_with(')') {
        out.push(')');
    }
    out
}
