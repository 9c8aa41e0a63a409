//! Command-line interface components
//!
//! This module contains CLI-specific code shared by the `qnx_fetcher` and
//! `qnx_credentials_helper` binaries: argument parsing, logging setup,
//! progress display and the command handlers.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{FetchCli, GlobalArgs, HelperAction, HelperCli};
pub use commands::{handle_fetch, handle_helper, session_header_for_request};
pub use progress::{download_progress_bar, ProgressConfig};

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;

/// Target prefix of every event emitted by the library
const CRATE_TARGET: &str = "qnx_fetcher";

/// Initialize logging on stderr
///
/// Verbosity flags win over the configured level. A `qnx_fetcher` directive
/// in `RUST_LOG` wins over both. Stdout is left alone for data.
pub fn init_logging(global: &GlobalArgs, config: &AppConfig) {
    let level = global
        .log_level()
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| config.logging.level.clone());

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), &level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(global.very_verbose) // Show levels only in very verbose mode
        .try_init()
        .ok();
}

fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    let rust_log = rust_log.unwrap_or_default();
    let filter = EnvFilter::new(rust_log);

    let overridden = rust_log
        .split(',')
        .any(|directive| directive.trim().starts_with(CRATE_TARGET));
    if overridden {
        return filter;
    }

    match format!("{}={}", CRATE_TARGET, level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            eprintln!("Ignoring invalid log level {:?}: {}", level, e);
            filter
        }
    }
}
