pub mod cli;
pub mod config;
pub mod run;

pub use cli::CliArgs;
pub use config::ActivityBoxConfig;
pub use run::{RunError, build_content, run};
