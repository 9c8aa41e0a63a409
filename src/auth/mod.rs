//! Credential resolution for qnx.com
//!
//! This module determines the username/password pair used for the qnx.com
//! login form, from environment variables or a netrc credential store.
//!
//! # Examples
//!
//! ```rust,no_run
//! use qnx_fetcher::auth::CredentialResolver;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = CredentialResolver::new()
//!     .with_netrc_path("/home/me/.netrc")
//!     .resolve()?;
//! # let _ = credentials;
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod netrc;

// Re-export main public API
pub use credentials::{resolve_credentials, CredentialResolver, CredentialSource, Credentials};
pub use netrc::{Netrc, NetrcEntry};
