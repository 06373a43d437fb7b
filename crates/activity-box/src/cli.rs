use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Command-line flags: `--config=<path>` and `--dry-run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: PathBuf,
    /// Print the summary instead of publishing it.
    pub dry_run: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            dry_run: false,
        }
    }
}

impl CliArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            if let Some(path) = arg.strip_prefix("--config=") {
                parsed.config_path = PathBuf::from(path);
            } else if arg == "--dry-run" {
                parsed.dry_run = true;
            } else {
                tracing::warn!(arg = %arg, "Ignoring unknown argument");
            }
        }
        parsed
    }
}
