//! Credential resolution for qnx.com
//!
//! Credentials come from the `SCORE_QNX_USER` / `SCORE_QNX_PASSWORD`
//! environment pair when both are set and non-empty, otherwise from the netrc
//! entry for `qnx.com`. They are resolved once per invocation and never
//! written anywhere.

use std::env;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::auth::netrc::Netrc;
use crate::constants::{auth, env as env_constants};
use crate::errors::{AuthError, AuthResult};

/// A username/password pair for the qnx.com login form
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where a resolved credential pair came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `SCORE_QNX_USER` / `SCORE_QNX_PASSWORD`
    Environment,
    /// A netrc file at the given path
    Netrc(PathBuf),
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(
                f,
                "environment ({} / {})",
                env_constants::USERNAME,
                env_constants::PASSWORD
            ),
            CredentialSource::Netrc(path) => write!(f, "netrc ({})", path.display()),
        }
    }
}

/// Resolves qnx.com credentials from the environment or a netrc file
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    host: String,
    netrc_path: Option<PathBuf>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self {
            host: auth::CREDENTIAL_HOST.to_string(),
            netrc_path: None,
        }
    }
}

impl CredentialResolver {
    /// Resolver for `qnx.com` using the default netrc location
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit netrc file instead of `$NETRC` / `~/.netrc`
    pub fn with_netrc_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.netrc_path = Some(path.into());
        self
    }

    /// Resolve credentials from the process environment
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialsNotFound` when neither source yields a pair
    pub fn resolve(&self) -> AuthResult<Credentials> {
        self.resolve_with(|name| env::var(name).ok())
            .map(|(credentials, _)| credentials)
    }

    /// Resolve credentials with an injected environment lookup, also
    /// reporting which source supplied them
    pub fn resolve_with<F>(&self, lookup: F) -> AuthResult<(Credentials, CredentialSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(env_constants::USERNAME).filter(|v| !v.is_empty());
        let password = lookup(env_constants::PASSWORD).filter(|v| !v.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => {
                tracing::info!("Using credentials from {}", CredentialSource::Environment);
                return Ok((
                    Credentials { username, password },
                    CredentialSource::Environment,
                ));
            }
            (Some(_), None) | (None, Some(_)) => {
                tracing::debug!(
                    "Only one of {} / {} is set, falling back to netrc",
                    env_constants::USERNAME,
                    env_constants::PASSWORD
                );
            }
            (None, None) => {}
        }

        let not_found = || AuthError::CredentialsNotFound {
            host: self.host.clone(),
        };

        let Some((path, is_default)) = self.netrc_location(&lookup) else {
            tracing::debug!("No home directory, cannot locate netrc");
            return Err(not_found());
        };

        let read = if is_default {
            Netrc::from_private_file(&path)
        } else {
            Netrc::from_file(&path)
        };

        let netrc = match read {
            Ok(netrc) => netrc,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No netrc file at {}", path.display());
                return Err(not_found());
            }
            Err(e) => {
                tracing::warn!("Failed to read netrc file {}: {}", path.display(), e);
                return Err(not_found());
            }
        };

        match netrc.authenticator(&self.host) {
            Some(entry) if !entry.login.is_empty() => {
                let source = CredentialSource::Netrc(path);
                tracing::info!("Using credentials from {}", source);
                Ok((
                    Credentials::new(entry.login.clone(), entry.password.clone()),
                    source,
                ))
            }
            _ => {
                tracing::debug!("No usable netrc entry for {}", self.host);
                Err(not_found())
            }
        }
    }

    /// netrc path to consult, and whether it is the per-user default
    fn netrc_location<F>(&self, lookup: &F) -> Option<(PathBuf, bool)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.netrc_path {
            return Some((path.clone(), false));
        }
        if let Some(path) = lookup(env_constants::NETRC).filter(|v| !v.is_empty()) {
            return Some((PathBuf::from(path), false));
        }
        lookup(env_constants::HOME)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .map(|home| (home.join(auth::NETRC_FILE_NAME), true))
    }
}

/// Resolve credentials for qnx.com using the default sources
pub fn resolve_credentials() -> AuthResult<Credentials> {
    CredentialResolver::new().resolve()
}
