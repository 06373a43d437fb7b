use std::path::Path;

use serde::Deserialize;

use activity_box_core::pipeline::{ELLIPSIS, SummaryLimits};
use activity_box_core::source::MAX_PER_PAGE;
use activity_box_github::config::DEFAULT_GIST_FILE_NAME;
use activity_box_github::{GistConfig, GitHubClientConfig};

/// Config file read when no `--config=` is given.
pub const DEFAULT_CONFIG_PATH: &str = "activity-box.toml";

/// Top-level configuration, loaded from `activity-box.toml` and the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActivityBoxConfig {
    /// Gist that receives the summary (`GIST_ID`).
    pub gist_id: String,
    /// Whose public activity to summarize (`GH_USERNAME`).
    pub username: String,
    /// Token with gist scope (`GH_PAT`).
    pub gist_token: Option<String>,
    /// Optional token for reading the events feed (`GITHUB_TOKEN`).
    pub github_token: Option<String>,
    pub api_base_url: String,
    /// File created when the gist is empty.
    pub gist_file_name: String,
    pub per_page: u8,
    pub summary: SummaryLimits,
}

impl Default for ActivityBoxConfig {
    fn default() -> Self {
        Self {
            gist_id: String::new(),
            username: String::new(),
            gist_token: None,
            github_token: None,
            api_base_url: GitHubClientConfig::default().api_base_url,
            gist_file_name: DEFAULT_GIST_FILE_NAME.to_string(),
            per_page: MAX_PER_PAGE,
            summary: SummaryLimits::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Read { path: String, message: String },
    Parse { path: String, message: String },
    Missing(&'static str),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::Parse { path, message } => write!(f, "failed to parse {path}: {message}"),
            Self::Missing(name) => write!(f, "missing required setting {name}"),
            Self::Invalid(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ActivityBoxConfig {
    /// Read the config file, or fall back to defaults when it does not exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            },
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            },
        };

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");

        if config.gist_token.is_some() || config.github_token.is_some() {
            tracing::warn!("Tokens are set in the config file; prefer GH_PAT and GITHUB_TOKEN");
        }
        Ok(config)
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(id) = var("GIST_ID") {
            self.gist_id = id;
        }
        if let Some(user) = var("GH_USERNAME") {
            self.username = user;
        }
        if let Some(token) = var("GH_PAT") {
            self.gist_token = Some(token);
        }
        if let Some(token) = var("GITHUB_TOKEN") {
            self.github_token = Some(token);
        }
        if let Some(url) = var("ACTIVITY_BOX_API_URL") {
            self.api_base_url = url;
        }
        if let Some(val) = var("ACTIVITY_BOX_MAX_LINES")
            && let Ok(n) = val.parse::<usize>()
        {
            self.summary.max_lines = n;
        }
        if let Some(val) = var("ACTIVITY_BOX_MAX_LENGTH")
            && let Ok(n) = val.parse::<usize>()
        {
            self.summary.max_length = n;
        }
    }

    /// Check the settings a run needs. Gist settings are only required when
    /// the summary is going to be published.
    pub fn validate(&self, publishing: bool) -> Result<(), ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::Missing("GH_USERNAME"));
        }
        if publishing {
            if self.gist_id.is_empty() {
                return Err(ConfigError::Missing("GIST_ID"));
            }
            if self.gist_token.as_deref().is_none_or(str::is_empty) {
                return Err(ConfigError::Missing("GH_PAT"));
            }
        }
        if self.summary.max_lines == 0 {
            return Err(ConfigError::Invalid(
                "summary.max_lines must be > 0".to_string(),
            ));
        }
        if self.summary.max_length <= ELLIPSIS.len() {
            return Err(ConfigError::Invalid(format!(
                "summary.max_length must be > {}",
                ELLIPSIS.len()
            )));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::Invalid(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }
        if self.gist_file_name.is_empty() {
            return Err(ConfigError::Invalid(
                "gist_file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from `path`, apply process environment overrides, and validate.
    pub fn load(path: &Path, publishing: bool) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate(publishing)?;
        Ok(config)
    }

    pub fn client_config(&self) -> GitHubClientConfig {
        GitHubClientConfig {
            api_base_url: self.api_base_url.clone(),
            ..GitHubClientConfig::default()
        }
    }

    pub fn gist_config(&self) -> GistConfig {
        GistConfig {
            gist_id: self.gist_id.clone(),
            token: self.gist_token.clone().unwrap_or_default(),
            fallback_file_name: self.gist_file_name.clone(),
        }
    }
}
