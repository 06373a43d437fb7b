use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::GitHubClientConfig;
use crate::error::GitHubError;

/// Longest error body echoed back in a `GitHubError::Status`.
const MAX_ERROR_BODY: usize = 200;

/// Thin wrapper over `reqwest::Client` carrying the GitHub API conventions.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubClientConfig) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GitHubError::Client(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match token {
            Some(token) if !token.is_empty() => {
                builder.header("Authorization", format!("Bearer {token}"))
            },
            _ => builder,
        }
    }

    /// Send a request and return the raw body of a successful response.
    pub(crate) async fn send(
        &self,
        url: &str,
        builder: RequestBuilder,
    ) -> Result<String, GitHubError> {
        let resp = builder.send().await.map_err(|e| GitHubError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| GitHubError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(GitHubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }
        Ok(body)
    }

    /// Send a request and decode a successful JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        builder: RequestBuilder,
    ) -> Result<T, GitHubError> {
        let body = self.send(url, builder).await?;
        serde_json::from_str(&body).map_err(|e| GitHubError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
