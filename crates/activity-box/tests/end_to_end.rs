#[allow(dead_code)]
mod common;

use activity_box::ActivityBoxConfig;
use activity_box::run::{RunError, run};
use activity_box_core::PublishOutcome;
use activity_box_github::{ActivityFeed, GistStore, GitHubClient};

use common::{MockGitHub, MockState};

async fn run_against(base_url: String) -> Result<PublishOutcome, RunError> {
    let config = ActivityBoxConfig {
        gist_id: "abc123".to_string(),
        username: "octocat".to_string(),
        gist_token: Some("ghp_x".to_string()),
        api_base_url: base_url,
        ..ActivityBoxConfig::default()
    };
    config.validate(true).unwrap();

    let client = GitHubClient::new(&config.client_config()).unwrap();
    let feed = ActivityFeed::new(client.clone(), config.github_token.clone());
    let store = GistStore::new(client, config.gist_config());
    run(&config, &feed, &store).await
}

#[tokio::test]
async fn publishes_then_skips_identical_content() {
    let mock = MockGitHub::start(MockState::default()).await;

    let outcome = run_against(mock.base_url()).await.unwrap();
    assert_eq!(outcome, PublishOutcome::Updated);
    assert_eq!(
        mock.gist_content().as_deref(),
        Some("📣 (2020-01-01T00:00:00Z) Pre-Released o/r v1.0")
    );

    let outcome = run_against(mock.base_url()).await.unwrap();
    assert_eq!(outcome, PublishOutcome::Unchanged);
    assert_eq!(mock.patches(), 1);
}

#[tokio::test]
async fn feed_failure_leaves_gist_alone() {
    let mock = MockGitHub::start(MockState {
        events_status: Some(503),
        gist_content: Some("old".to_string()),
        ..MockState::default()
    })
    .await;

    let err = run_against(mock.base_url()).await.unwrap_err();
    assert!(matches!(err, RunError::Fetch(_)), "got {err:?}");
    assert!(err.to_string().contains("503"));
    assert_eq!(mock.patches(), 0);
    assert_eq!(mock.gist_content().as_deref(), Some("old"));
}
