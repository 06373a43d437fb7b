use reqwest::Method;

use activity_box_core::event::ActivityEvent;
use activity_box_core::source::{EventSource, MAX_PER_PAGE};

use crate::client::GitHubClient;
use crate::error::GitHubError;

/// Public events feed for a user, `GET /users/{username}/events/public`.
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    client: GitHubClient,
    /// Optional read token; the endpoint also works anonymously at a lower
    /// rate limit.
    token: Option<String>,
}

impl ActivityFeed {
    pub fn new(client: GitHubClient, token: Option<String>) -> Self {
        Self { client, token }
    }
}

impl EventSource for ActivityFeed {
    type Error = GitHubError;

    async fn list_public_events(
        &self,
        username: &str,
        per_page: u8,
    ) -> Result<Vec<ActivityEvent>, GitHubError> {
        let url = self.client.url(&format!("/users/{username}/events/public"));
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let builder = self
            .client
            .request(Method::GET, &url, self.token.as_deref())
            .query(&[("per_page", per_page)]);
        self.client.send_json(&url, builder).await
    }
}
