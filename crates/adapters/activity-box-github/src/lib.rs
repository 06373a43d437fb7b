pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod gist;

pub use client::GitHubClient;
pub use config::{GistConfig, GitHubClientConfig};
pub use error::GitHubError;
pub use events::ActivityFeed;
pub use gist::GistStore;
