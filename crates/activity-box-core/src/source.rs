use std::future::Future;

use crate::event::ActivityEvent;

/// Maximum page size the public events endpoint accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Supplier of a user's public activity feed, newest first.
pub trait EventSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_public_events(
        &self,
        username: &str,
        per_page: u8,
    ) -> impl Future<Output = Result<Vec<ActivityEvent>, Self::Error>> + Send;
}
