//! Authenticated session client for qnx.com
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `cookies`: cookie store recording everything the login exchange sets
//! - `http`: the `Transport` seam and its `reqwest` implementation
//! - `auth`: the login form flow and session-cookie check
//! - `download`: gzip-validated streaming downloads
//!
//! A [`Session`] can only be obtained from a successful [`QnxClient::login`],
//! so nothing is downloaded or emitted without the `myQNX` cookie in hand.

use std::path::Path;

use indicatif::ProgressBar;
use url::Url;

use crate::app::models::{CookieJar, SessionHeader};
use crate::auth::Credentials;
use crate::constants::REQUIRED_DOMAIN;
use crate::errors::{AppError, AuthError, AuthResult, DownloadError, Result};

// Module declarations
pub mod auth;
pub mod config;
pub mod cookies;
pub mod download;
pub mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use cookies::SessionCookieStore;
pub use http::{HttpTransport, ResponseBody, Transport};

use auth::AuthHandler;
use download::DownloadHandler;

/// Rejects URLs that do not mention qnx.com anywhere
///
/// This is a substring check, applied before any network call.
pub fn ensure_supported_domain(url: &str) -> Result<()> {
    if url.contains(REQUIRED_DOMAIN) {
        Ok(())
    } else {
        Err(AppError::UnsupportedDomain {
            url: url.to_string(),
        })
    }
}

/// HTTP client for qnx.com
///
/// Generic over the transport so tests can substitute a fake one.
#[derive(Debug)]
pub struct QnxClient<T: Transport = HttpTransport> {
    transport: T,
    login_url: Url,
}

impl QnxClient<HttpTransport> {
    /// Creates a client with the default configuration
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if HTTP client creation fails
    pub fn new() -> AuthResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if HTTP client creation fails
    pub fn with_config(config: &ClientConfig) -> AuthResult<Self> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(transport)
    }
}

impl<T: Transport> QnxClient<T> {
    /// Creates a client over an explicit transport
    pub fn with_transport(transport: T) -> AuthResult<Self> {
        Ok(Self {
            transport,
            login_url: AuthHandler::login_url()?,
        })
    }

    #[cfg(test)]
    fn with_login_url(mut self, login_url: Url) -> Self {
        self.login_url = login_url;
        self
    }

    /// Get a reference to the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Logs in to qnx.com
    ///
    /// # Errors
    ///
    /// Returns `AuthError::LoginFailed` for a non-200 answer and
    /// `AuthError::MissingSessionCookie` when no `myQNX` cookie was issued.
    pub async fn login(&self, credentials: &Credentials) -> AuthResult<Session<'_, T>> {
        let cookies = AuthHandler::login(&self.transport, &self.login_url, credentials).await?;
        Session::new(self, cookies)
    }

    /// Validates `uri`, resolves credentials, logs in and packages the session
    /// cookie as a header override
    ///
    /// Credentials are only resolved once the domain check has passed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnsupportedDomain` before any other work when `uri`
    /// lacks qnx.com, otherwise any credential or login error.
    pub async fn fetch_session_header<F>(&self, uri: &str, credentials: F) -> Result<SessionHeader>
    where
        F: FnOnce() -> AuthResult<Credentials>,
    {
        ensure_supported_domain(uri)?;
        let credentials = credentials()?;
        let session = self.login(&credentials).await?;
        Ok(session.session_header())
    }

    /// Validates `url`, resolves credentials, logs in and downloads to
    /// `destination`
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnsupportedDomain` before any other work when `url`
    /// lacks qnx.com, otherwise any credential, login or download error.
    pub async fn fetch_file<F>(
        &self,
        url: &str,
        destination: &Path,
        credentials: F,
        progress: &ProgressBar,
    ) -> Result<u64>
    where
        F: FnOnce() -> AuthResult<Credentials>,
    {
        ensure_supported_domain(url)?;
        let credentials = credentials()?;
        let session = self.login(&credentials).await?;
        session.download_with_progress(url, destination, progress).await
    }
}

/// A logged-in qnx.com session
#[derive(Debug)]
pub struct Session<'a, T: Transport> {
    client: &'a QnxClient<T>,
    cookies: CookieJar,
    session_cookie: String,
}

impl<'a, T: Transport> Session<'a, T> {
    fn new(client: &'a QnxClient<T>, cookies: CookieJar) -> AuthResult<Self> {
        let session_cookie = cookies
            .session_cookie()
            .ok_or_else(|| AuthError::MissingSessionCookie {
                cookie: crate::constants::SESSION_COOKIE.to_string(),
            })?
            .to_string();
        Ok(Self {
            client,
            cookies,
            session_cookie,
        })
    }

    /// Cookies captured during login
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookies
    }

    /// Value of the `myQNX` cookie
    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    /// The session cookie packaged for an external HTTP client
    pub fn session_header(&self) -> SessionHeader {
        SessionHeader::from_session_cookie(&self.session_cookie)
    }

    /// Downloads `url` to `destination` without progress output
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        self.download_with_progress(url, destination, &ProgressBar::hidden())
            .await
    }

    /// Downloads `url` to `destination`, reporting bytes on `progress`
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnsupportedDomain` before any network call when
    /// `url` lacks qnx.com, otherwise any `DownloadError`.
    pub async fn download_with_progress(
        &self,
        url: &str,
        destination: &Path,
        progress: &ProgressBar,
    ) -> Result<u64> {
        ensure_supported_domain(url)?;
        let parsed_url = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            error: e.to_string(),
        })?;

        tracing::info!("Downloading {} -> {}", url, destination.display());
        let written = DownloadHandler::new(&self.client.transport)
            .download_file(&parsed_url, destination, progress)
            .await?;
        Ok(written)
    }
}
