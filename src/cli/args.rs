//! Command-line argument parsing for QNX Fetcher
//!
//! This module defines the argument structure of both binaries using clap
//! derive macros: the downloader and the credentials helper.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

/// Download an authenticated qnx.com asset
#[derive(Parser, Debug)]
#[command(
    name = "qnx_fetcher",
    version,
    about = "Login to qnx.com and download an SDP (or any authenticated asset) to a local file",
    long_about = "Login to qnx.com and download an SDP (or any authenticated asset) to a local file.

Credentials are taken from SCORE_QNX_USER / SCORE_QNX_PASSWORD or from the ~/.netrc entry for \"qnx.com\"."
)]
pub struct FetchCli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// URL of the asset (must be a qnx.com URL)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Destination file, overwritten if it exists
    #[arg(value_name = "OUTPUT_PATH")]
    pub output_path: PathBuf,
}

/// Emit a qnx.com session cookie as a JSON header override
#[derive(Parser, Debug)]
#[command(
    name = "qnx_credentials_helper",
    version,
    about = "Obtain a qnx.com login cookie for authenticated downloads",
    long_about = "Reads {\"uri\": \"<qnx download url>\"} from stdin and writes
{\"headers\": {\"Cookie\": [\"myQNX=<value>\"]}} to stdout.

Credentials are taken from SCORE_QNX_USER / SCORE_QNX_PASSWORD or from the ~/.netrc entry for \"qnx.com\"."
)]
pub struct HelperCli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Credential helper action
    #[arg(value_enum, default_value_t = HelperAction::Get)]
    pub action: HelperAction,
}

/// Actions understood by the credentials helper
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HelperAction {
    /// Print the session header for the requested URI
    Get,
}

/// Global arguments shared by both binaries
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Logging level requested on the command line, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.quiet {
            Some(tracing::Level::ERROR)
        } else if self.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}
