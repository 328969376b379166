//! ghlist CLI
//!
//! Command-line interface over the GitHub list endpoints

use clap::Parser;
use ghlist::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let runner = Runner::new(Cli::parse());

    let config = match runner.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    let level: tracing::Level = runner.log_level(&config).into();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = runner.run(config).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
