//! Command handlers for QNX Fetcher
//!
//! This module implements the handlers behind both binaries, coordinating
//! between CLI arguments, configuration and the session client.

use std::io::{Read, Write};

use tracing::info;

use crate::app::client::{ensure_supported_domain, QnxClient, Transport};
use crate::app::models::{HelperRequest, SessionHeader};
use crate::auth::Credentials;
use crate::cli::progress::{download_progress_bar, ProgressConfig};
use crate::cli::FetchCli;
use crate::config::AppConfig;
use crate::errors::{AuthResult, Result};

/// Handle the download command
///
/// Logs in and streams `cli.url` into `cli.output_path`, printing a
/// confirmation line on success.
pub async fn handle_fetch(cli: &FetchCli, config: &AppConfig) -> Result<()> {
    ensure_supported_domain(&cli.url)?;

    let client = QnxClient::with_config(&config.client_config())?;
    let resolver = config.credential_resolver();
    let progress = download_progress_bar(&ProgressConfig::for_quiet(cli.global.quiet));

    let result = client
        .fetch_file(
            &cli.url,
            &cli.output_path,
            || resolver.resolve(),
            &progress,
        )
        .await;
    progress.finish_and_clear();

    let written = result?;
    info!("Wrote {} bytes", written);
    println!("Downloaded {} -> {}", cli.url, cli.output_path.display());
    Ok(())
}

/// Handle the credentials helper
///
/// Reads the request from `input` and writes exactly one JSON object to
/// `output` on success. Nothing is written to `output` on failure.
pub async fn handle_helper<R, W>(input: R, mut output: W, config: &AppConfig) -> Result<()>
where
    R: Read,
    W: Write,
{
    let client = QnxClient::with_config(&config.client_config())?;
    let resolver = config.credential_resolver();

    let header = session_header_for_request(input, &client, || resolver.resolve()).await?;

    let json = serde_json::to_string(&header)?;
    writeln!(output, "{}", json)?;
    output.flush()?;
    Ok(())
}

/// Parse a helper request and obtain the session header for its URI
pub async fn session_header_for_request<R, T, F>(
    input: R,
    client: &QnxClient<T>,
    credentials: F,
) -> Result<SessionHeader>
where
    R: Read,
    T: Transport,
    F: FnOnce() -> AuthResult<Credentials>,
{
    let request: HelperRequest = serde_json::from_reader(input)?;
    info!("Session header requested for {}", request.uri);
    client.fetch_session_header(&request.uri, credentials).await
}
