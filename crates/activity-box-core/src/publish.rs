use std::future::Future;

/// Remote text snippet the summary is published to.
pub trait SnippetStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Current content, or `None` when the snippet holds no file yet.
    fn get(&self) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Replace the stored content wholesale.
    fn update(&self, content: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Successful result of a publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Updated,
    Unchanged,
}

impl PublishOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Updated => "Gist updated!",
            Self::Unchanged => "No need for updated Gist!",
        }
    }
}

/// Whether `new` has to be written over `current`.
///
/// A snippet with no prior content is always written, even when the new
/// summary is empty.
pub fn needs_update(current: Option<&str>, new: &str) -> bool {
    match current {
        None => true,
        Some(existing) => existing != new,
    }
}

/// Read the snippet once and write `content` only if it differs.
pub async fn publish<S: SnippetStore>(
    store: &S,
    content: &str,
) -> Result<PublishOutcome, S::Error> {
    let current = store.get().await?;
    if current.is_none() {
        tracing::debug!("Snippet has no prior content");
    }

    if !needs_update(current.as_deref(), content) {
        return Ok(PublishOutcome::Unchanged);
    }

    store.update(content).await?;
    Ok(PublishOutcome::Updated)
}
