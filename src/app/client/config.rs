//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the `reqwest`
//! client used for the qnx.com login and download requests.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::CookieStore;
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::http;
use crate::errors::{AuthError, AuthResult};

/// Configuration for the HTTP client
///
/// No timeouts are applied unless configured; the transport defaults apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User agent sent with every request
    pub user_agent: String,
    /// Connect timeout
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout (covers streaming the download body)
    pub request_timeout: Option<Duration>,
    /// Maximum number of redirects to follow
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_redirects: http::MAX_REDIRECTS,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client around the given cookie store
    pub fn build_http_client<C>(&self, cookie_store: Arc<C>) -> AuthResult<Client>
    where
        C: CookieStore + 'static,
    {
        let mut client_builder = Client::builder()
            .cookie_provider(cookie_store) // Session auth depends on it
            .user_agent(&self.user_agent)
            .redirect(Policy::limited(self.max_redirects));

        if let Some(timeout) = self.connect_timeout {
            client_builder = client_builder.connect_timeout(timeout);
        }

        if let Some(timeout) = self.request_timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder.build().map_err(AuthError::Http)
    }
}
