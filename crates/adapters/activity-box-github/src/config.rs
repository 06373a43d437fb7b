/// Connection settings shared by the feed and gist clients.
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// REST API root, without trailing slash.
    pub api_base_url: String,
    /// Sent as `User-Agent`; the API rejects requests without one.
    pub user_agent: String,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            user_agent: concat!("activity-box/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Which gist to publish to and how to authenticate.
#[derive(Debug, Clone)]
pub struct GistConfig {
    pub gist_id: String,
    /// Token with `gist` scope.
    pub token: String,
    /// File written when the gist has no files yet.
    pub fallback_file_name: String,
}

impl GistConfig {
    pub fn new(gist_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            gist_id: gist_id.into(),
            token: token.into(),
            fallback_file_name: DEFAULT_GIST_FILE_NAME.to_string(),
        }
    }
}

pub const DEFAULT_GIST_FILE_NAME: &str = "activity.md";
