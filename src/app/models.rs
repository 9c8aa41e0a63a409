//! Data models for QNX Fetcher
//!
//! Cookie jar snapshots taken after login, and the JSON shapes exchanged with
//! external tooling by the credentials helper.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::auth;

/// Cookies received during the login exchange, by name
///
/// Values are session secrets, so `Debug` lists names only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie` request header value (`a=1; b=2`)
    pub fn from_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { cookies }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Apply a `Set-Cookie` response header value
    ///
    /// The cookie replaces any earlier one of the same name. A non-positive
    /// `Max-Age` removes it instead.
    pub fn apply_set_cookie(&mut self, header: &str) {
        let mut parts = header.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let expired = parts.any(|attribute| {
            attribute
                .split_once('=')
                .filter(|(key, _)| key.trim().eq_ignore_ascii_case("max-age"))
                .and_then(|(_, age)| age.trim().parse::<i64>().ok())
                .is_some_and(|age| age <= 0)
        });

        if expired {
            self.cookies.remove(name);
        } else {
            self.insert(name, value.trim());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Value of the `myQNX` session cookie, if login issued one
    pub fn session_cookie(&self) -> Option<&str> {
        self.get(auth::SESSION_COOKIE)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.keys().map(String::as_str)
    }
}

impl fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Request read from stdin by the credentials helper: `{"uri": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperRequest {
    /// A missing field deserializes to the empty string and then fails the
    /// domain check.
    #[serde(default)]
    pub uri: String,
}

/// Header override handed to an external HTTP client
///
/// Serializes as `{"headers": {"Cookie": ["myQNX=<value>"]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeader {
    pub headers: SessionHeaders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeaders {
    #[serde(rename = "Cookie")]
    pub cookie: Vec<String>,
}

impl SessionHeader {
    /// Package a `myQNX` cookie value
    pub fn from_session_cookie(value: &str) -> Self {
        Self {
            headers: SessionHeaders {
                cookie: vec![format!("{}={}", auth::SESSION_COOKIE, value)],
            },
        }
    }
}
