//! Credential helper for external HTTP clients
//!
//! Reads `{"uri": "..."}` from stdin, logs in to qnx.com and writes the
//! session cookie as `{"headers": {"Cookie": ["myQNX=<value>"]}}` to stdout.
//! Diagnostics go to stderr so stdout only ever carries the JSON object.

use std::io;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use qnx_fetcher::cli::{handle_helper, init_logging, HelperAction, HelperCli};
use qnx_fetcher::config::AppConfig;
use qnx_fetcher::errors::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    let cli = match HelperCli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprint!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cli).await {
        debug!("Helper failed ({})", e.category());
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: HelperCli) -> Result<()> {
    let config = AppConfig::load(cli.global.config.clone()).await?;
    init_logging(&cli.global, &config);

    match cli.action {
        HelperAction::Get => {
            debug!("Serving credential request");
            handle_helper(io::stdin().lock(), io::stdout().lock(), &config).await
        }
    }
}
