use activity_box_core::pipeline::build_summary;
use activity_box_core::publish::{PublishOutcome, SnippetStore, publish};
use activity_box_core::serializer::FormatError;
use activity_box_core::source::EventSource;

use crate::config::ActivityBoxConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a run failed.
#[derive(Debug)]
pub enum RunError {
    /// The activity feed could not be fetched. Nothing was published.
    Fetch(BoxError),
    /// A recognized event lacked a field its serializer needs.
    Format(FormatError),
    /// Reading or writing the gist failed.
    Publish(BoxError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "failed to fetch activity: {e}"),
            Self::Format(e) => write!(f, "failed to format activity: {e}"),
            Self::Publish(e) => write!(f, "failed to update gist: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) | Self::Publish(e) => Some(e.as_ref()),
            Self::Format(e) => Some(e),
        }
    }
}

/// Fetch the feed and render the summary blob.
pub async fn build_content<E: EventSource>(
    config: &ActivityBoxConfig,
    source: &E,
) -> Result<String, RunError> {
    tracing::debug!(username = %config.username, "Getting activity");
    let events = source
        .list_public_events(&config.username, config.per_page)
        .await
        .map_err(|e| RunError::Fetch(Box::new(e)))?;
    tracing::debug!(
        username = %config.username,
        count = events.len(),
        "Activity fetched"
    );

    build_summary(&events, config.summary).map_err(RunError::Format)
}

/// One full run: fetch, summarize, and publish if the gist changed.
pub async fn run<E: EventSource, S: SnippetStore>(
    config: &ActivityBoxConfig,
    source: &E,
    store: &S,
) -> Result<PublishOutcome, RunError> {
    let content = build_content(config, source).await?;

    tracing::debug!(gist_id = %config.gist_id, "Updating gist");
    match publish(store, &content).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::debug!(error = %e, "Error getting or updating the gist");
            Err(RunError::Publish(Box::new(e)))
        },
    }
}
