pub mod event;
pub mod pipeline;
pub mod publish;
pub mod serializer;
pub mod source;

pub use event::{ActivityEvent, EventKind, Repo};
pub use pipeline::{SummaryLimits, build_summary};
pub use publish::{PublishOutcome, SnippetStore, publish};
pub use serializer::{Activity, FormatError};
pub use source::EventSource;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::event::{ActivityEvent, Repo};
    use crate::publish::SnippetStore;
    use crate::source::EventSource;

    /// Error raised by the in-memory collaborators.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FakeError(pub String);

    impl std::fmt::Display for FakeError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for FakeError {}

    /// Build a feed record with the given tag, repo and payload.
    pub fn make_event(event_type: &str, repo: &str, payload: serde_json::Value) -> ActivityEvent {
        ActivityEvent {
            event_type: event_type.to_string(),
            created_at: "2020-01-01T00:00:00Z".to_string(),
            repo: Repo {
                name: repo.to_string(),
            },
            payload,
        }
    }

    /// In-memory snippet that counts successful writes.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        content: Mutex<Option<String>>,
        writes: AtomicUsize,
        fail_get: bool,
        fail_update: bool,
    }

    impl MemoryStore {
        pub fn empty() -> Self {
            Self::default()
        }

        pub fn with_content(content: &str) -> Self {
            Self {
                content: Mutex::new(Some(content.to_string())),
                ..Self::default()
            }
        }

        pub fn failing_get(mut self) -> Self {
            self.fail_get = true;
            self
        }

        pub fn failing_update(mut self) -> Self {
            self.fail_update = true;
            self
        }

        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        pub fn content(&self) -> Option<String> {
            self.content.lock().unwrap().clone()
        }
    }

    impl SnippetStore for MemoryStore {
        type Error = FakeError;

        async fn get(&self) -> Result<Option<String>, FakeError> {
            if self.fail_get {
                return Err(FakeError("snippet get failed".to_string()));
            }
            Ok(self.content())
        }

        async fn update(&self, content: &str) -> Result<(), FakeError> {
            if self.fail_update {
                return Err(FakeError("snippet update failed".to_string()));
            }
            *self.content.lock().unwrap() = Some(content.to_string());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Event source that replays a fixed feed, or fails every call.
    #[derive(Debug, Default)]
    pub struct StaticSource {
        events: Vec<ActivityEvent>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StaticSource {
        pub fn new(events: Vec<ActivityEvent>) -> Self {
            Self {
                events,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EventSource for StaticSource {
        type Error = FakeError;

        async fn list_public_events(
            &self,
            _username: &str,
            per_page: u8,
        ) -> Result<Vec<ActivityEvent>, FakeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FakeError("event fetch failed".to_string()));
            }
            Ok(self.events.iter().take(per_page as usize).cloned().collect())
        }
    }
}
