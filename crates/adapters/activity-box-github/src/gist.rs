use std::collections::BTreeMap;
use std::sync::Mutex;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use activity_box_core::publish::SnippetStore;

use crate::client::GitHubClient;
use crate::config::GistConfig;
use crate::error::GitHubError;

#[derive(Debug, Deserialize)]
struct Gist {
    #[serde(default)]
    files: BTreeMap<String, Option<GistFile>>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct GistPatch<'a> {
    files: BTreeMap<&'a str, FilePatch<'a>>,
}

#[derive(Debug, Serialize)]
struct FilePatch<'a> {
    content: &'a str,
}

/// A gist used as a single-file text snippet.
///
/// The first file (by name) holds the content. Its name is remembered from
/// the last `get` so `update` rewrites the same file.
#[derive(Debug)]
pub struct GistStore {
    client: GitHubClient,
    config: GistConfig,
    file_name: Mutex<Option<String>>,
}

impl GistStore {
    pub fn new(client: GitHubClient, config: GistConfig) -> Self {
        Self {
            client,
            config,
            file_name: Mutex::new(None),
        }
    }

    fn gist_url(&self) -> String {
        self.client.url(&format!("/gists/{}", self.config.gist_id))
    }

    fn remember_file_name(&self, name: Option<String>) {
        if let Ok(mut slot) = self.file_name.lock() {
            *slot = name;
        }
    }

    fn target_file_name(&self) -> String {
        self.file_name
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .unwrap_or_else(|| self.config.fallback_file_name.clone())
    }
}

impl SnippetStore for GistStore {
    type Error = GitHubError;

    async fn get(&self) -> Result<Option<String>, GitHubError> {
        let url = self.gist_url();
        let builder = self
            .client
            .request(Method::GET, &url, Some(self.config.token.as_str()));
        let gist: Gist = self.client.send_json(&url, builder).await?;

        let Some((name, file)) = gist.files.into_iter().next() else {
            self.remember_file_name(None);
            return Ok(None);
        };
        tracing::debug!(gist_id = %self.config.gist_id, file = %name, "Fetched gist");
        self.remember_file_name(Some(name));
        Ok(file.and_then(|f| f.content))
    }

    async fn update(&self, content: &str) -> Result<(), GitHubError> {
        let url = self.gist_url();
        let file_name = self.target_file_name();
        let patch = GistPatch {
            files: BTreeMap::from([(file_name.as_str(), FilePatch { content })]),
        };
        let builder = self
            .client
            .request(Method::PATCH, &url, Some(self.config.token.as_str()))
            .json(&patch);
        self.client.send(&url, builder).await?;
        tracing::debug!(gist_id = %self.config.gist_id, file = %file_name, "Updated gist");
        Ok(())
    }
}
