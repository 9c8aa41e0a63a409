//! Error types for QNX Fetcher
//!
//! Errors are grouped by the component that raises them. Every error is
//! terminal for the invocation; the binaries print the message to stderr and
//! exit with status 1.

use std::path::PathBuf;
use thiserror::Error;

/// Credential resolution and login errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Neither the environment nor the credential store yielded a usable pair
    #[error(
        "No credentials found (set SCORE_QNX_USER / SCORE_QNX_PASSWORD or add a ~/.netrc entry for {host})"
    )]
    CredentialsNotFound { host: String },

    /// HTTP request failed during login
    #[error("HTTP request failed during login: {0}")]
    Http(#[from] reqwest::Error),

    /// Login endpoint answered with something other than 200
    #[error("Failed to login to QNX (status {status})")]
    LoginFailed { status: u16 },

    /// Login answered 200 but never issued the session cookie
    #[error("Failed to get {cookie} cookie from login page. Check your QNX credentials")]
    MissingSessionCookie { cookie: String },

    /// A URL used by the login flow could not be parsed
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

/// Authenticated download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error while writing the destination file
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Body did not start with the gzip magic bytes
    #[error(
        "Unexpected content (HTTP {status}, Content-Type: {}). Check your QNX credentials or the URL. Response starts with: {snippet:?}",
        content_type.as_deref().unwrap_or("<none>")
    )]
    UnexpectedContent {
        status: u16,
        content_type: Option<String>,
        snippet: String,
    },

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// URL outside qnx.com, rejected before any network call
    #[error("Unsupported domain (expected qnx.com): {url}")]
    UnsupportedDomain { url: String },

    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed helper request on stdin
    #[error("Invalid request JSON: {0}")]
    Request(#[from] serde_json::Error),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::UnsupportedDomain { .. } => "domain",
            AppError::Auth(_) => "authentication",
            AppError::Download(_) => "download",
            AppError::Config(_) => "config",
            AppError::Request(_) => "request",
            AppError::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Authentication result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
