//! Core application components
//!
//! This module contains the session client and the data types that flow
//! between the login, download and credential-helper paths.

pub mod client;
pub mod models;

// Re-export main types for convenience
pub use client::{
    ensure_supported_domain, ClientConfig, HttpTransport, QnxClient, ResponseBody, Session,
    Transport,
};
pub use models::{CookieJar, HelperRequest, SessionHeader, SessionHeaders};
