use tracing_subscriber::EnvFilter;

use activity_box::{ActivityBoxConfig, CliArgs, build_content, run};
use activity_box_github::{ActivityFeed, GistStore, GitHubClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse(std::env::args().skip(1));

    let config = match ActivityBoxConfig::load(&args.config_path, !args.dry_run) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("activity-box: {e}");
            std::process::exit(1);
        },
    };

    let client = match GitHubClient::new(&config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build GitHub client");
            eprintln!("activity-box: {e}");
            std::process::exit(1);
        },
    };
    let feed = ActivityFeed::new(client.clone(), config.github_token.clone());

    if args.dry_run {
        match build_content(&config, &feed).await {
            Ok(content) => println!("{content}"),
            Err(e) => {
                tracing::error!(error = %e, "Dry run failed");
                eprintln!("activity-box: {e}");
                std::process::exit(1);
            },
        }
        return;
    }

    let store = GistStore::new(client, config.gist_config());
    match run(&config, &feed, &store).await {
        Ok(outcome) => {
            tracing::info!(gist_id = %config.gist_id, "{}", outcome.message());
            println!("{}", outcome.message());
        },
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("activity-box: {e}");
            std::process::exit(1);
        },
    }
}
