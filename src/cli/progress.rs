//! Download progress display
//!
//! A single byte-counting bar drawn on stderr. indicatif hides it on its own
//! when stderr is not a terminal, so piping the output stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Configuration for progress display
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Enable the visual progress bar
    pub enable_progress_bar: bool,
    /// Show download rate in progress bar
    pub show_download_rate: bool,
    /// Show ETA in progress bar
    pub show_eta: bool,
    /// Spinner tick interval
    pub tick_interval: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enable_progress_bar: true,
            show_download_rate: true,
            show_eta: true,
            tick_interval: Duration::from_millis(100),
        }
    }
}

impl ProgressConfig {
    /// Progress settings for the given quiet flag
    pub fn for_quiet(quiet: bool) -> Self {
        Self {
            enable_progress_bar: !quiet,
            ..Default::default()
        }
    }

    fn template(&self) -> &'static str {
        if self.show_eta && self.show_download_rate {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {bytes_per_sec}"
        } else if self.show_eta {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})"
        } else if self.show_download_rate {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec}"
        } else {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes}"
        }
    }
}

/// Create the bar used while streaming a download
///
/// The length is filled in once the response declares a `Content-Length`.
pub fn download_progress_bar(config: &ProgressConfig) -> ProgressBar {
    if !config.enable_progress_bar {
        return ProgressBar::hidden();
    }

    let style = match ProgressStyle::default_bar().template(config.template()) {
        Ok(style) => style.progress_chars("##-"),
        Err(e) => {
            tracing::debug!("Progress bar template error: {}", e);
            ProgressStyle::default_bar()
        }
    };

    let bar = ProgressBar::new(0).with_style(style);
    bar.enable_steady_tick(config.tick_interval);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        for (show_eta, show_download_rate) in [(true, true), (true, false), (false, true), (false, false)] {
            let config = ProgressConfig {
                show_eta,
                show_download_rate,
                ..Default::default()
            };
            assert!(ProgressStyle::default_bar().template(config.template()).is_ok());
        }
    }

    #[test]
    fn test_quiet_hides_bar() {
        let bar = download_progress_bar(&ProgressConfig::for_quiet(true));
        assert!(bar.is_hidden());
    }

    #[test]
    fn test_bar_counts_bytes() {
        let bar = download_progress_bar(&ProgressConfig::default());
        bar.set_length(1024);
        bar.inc(512);
        assert_eq!(bar.position(), 512);
        bar.finish_and_clear();
    }
}
