//! QNX Fetcher CLI application
//!
//! Logs in to qnx.com and downloads an authenticated gzip asset to a local
//! file.

use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};

use qnx_fetcher::cli::{handle_fetch, init_logging, FetchCli};
use qnx_fetcher::config::AppConfig;
use qnx_fetcher::constants::REQUIRED_DOMAIN;
use qnx_fetcher::errors::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = match FetchCli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprint!("{}", e);
            process::exit(1);
        }
    };

    // Reject foreign URLs before touching configuration or the network
    if !cli.url.contains(REQUIRED_DOMAIN) {
        eprintln!("{}", FetchCli::command().render_usage());
        eprintln!("Expected a {} URL, got: {}", REQUIRED_DOMAIN, cli.url);
        process::exit(1);
    }

    if let Err(e) = run(cli).await {
        debug!("Fetch failed ({})", e.category());
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: FetchCli) -> Result<()> {
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli.global, &config);
    info!("QNX Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    handle_fetch(&cli, &config).await
}
