//! Prelude module for QNX Fetcher Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use qnx_fetcher::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use qnx_fetcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = QnxClient::new()?;
//!     let credentials = resolve_credentials()?;
//!     let session = client.login(&credentials).await?;
//!
//!     session
//!         .download("https://www.qnx.com/download/sdp.tar.gz", Path::new("sdp.tar.gz"))
//!         .await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, AuthError, DownloadError, Result};

// Session client and the data it produces
pub use crate::app::{
    ensure_supported_domain, ClientConfig, CookieJar, HttpTransport, QnxClient, Session,
    SessionHeader, Transport,
};

// Credentials
pub use crate::auth::{resolve_credentials, CredentialResolver, Credentials};

// Configuration
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{
    ENV_PASSWORD, ENV_USERNAME, QNX_LOGIN_URL, REQUIRED_DOMAIN, SESSION_COOKIE, USER_AGENT,
};

pub use std::path::{Path, PathBuf};
