//! QNX Fetcher Library
//!
//! Logs in to qnx.com with the account form, captures the `myQNX` session
//! cookie and either downloads an authenticated gzip asset or hands the
//! cookie to another HTTP client as a header override.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
