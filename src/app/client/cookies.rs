//! Cookie store for the login exchange
//!
//! reqwest's [`Jar`] only answers "which cookies go to this URL", so a cookie
//! scoped to a path other than the login page would look absent right after a
//! successful login. [`SessionCookieStore`] keeps the jar for request
//! matching and also records the name and value of every cookie received.

use std::sync::Mutex;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use url::Url;

use crate::app::models::CookieJar;

/// `reqwest` cookie provider remembering every cookie it was handed
#[derive(Debug, Default)]
pub struct SessionCookieStore {
    jar: Jar,
    received: Mutex<CookieJar>,
}

impl SessionCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cookie received so far, regardless of domain or path
    pub fn received(&self) -> CookieJar {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CookieStore for SessionCookieStore {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<&HeaderValue> = cookie_headers.collect();

        {
            let mut received = match self.received.lock() {
                Ok(received) => received,
                Err(poisoned) => poisoned.into_inner(),
            };
            for header in &headers {
                match header.to_str() {
                    Ok(value) => received.apply_set_cookie(value),
                    Err(_) => tracing::debug!("Ignoring non-ASCII Set-Cookie from {}", url),
                }
            }
        }

        self.jar.set_cookies(&mut headers.into_iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}
