//! Application constants for QNX Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

/// Environment variable names for authentication
pub mod env {
    /// Environment variable name for the qnx.com username
    pub const USERNAME: &str = "SCORE_QNX_USER";

    /// Environment variable name for the qnx.com password
    pub const PASSWORD: &str = "SCORE_QNX_PASSWORD";

    /// Environment variable overriding the credential store location
    pub const NETRC: &str = "NETRC";

    /// Home directory, searched for the default netrc file
    pub const HOME: &str = "HOME";
}

/// Authentication and session constants
pub mod auth {
    /// Host looked up in the credential store
    pub const CREDENTIAL_HOST: &str = "qnx.com";

    /// Login form endpoint. Not configurable.
    pub const QNX_LOGIN_URL: &str = "https://www.qnx.com/account/login.html";

    /// Name of the cookie whose presence proves a successful login
    pub const SESSION_COOKIE: &str = "myQNX";

    /// Form field carrying the username
    pub const FORM_USER_FIELD: &str = "userlogin";

    /// Form field carrying the password
    pub const FORM_PASSWORD_FIELD: &str = "password";

    /// Form field asking the server to issue a persistent cookie
    pub const FORM_USE_COOKIE_FIELD: &str = "UseCookie";

    /// Default credential store file name under the home directory
    pub const NETRC_FILE_NAME: &str = ".netrc";
}

/// Domain validation for download and helper URLs
pub mod domain {
    /// Substring every accepted URL must contain
    pub const REQUIRED_DOMAIN: &str = "qnx.com";
}

/// HTTP client configuration constants
pub mod http {
    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("QNX-Fetcher/", env!("CARGO_PKG_VERSION"));

    /// Maximum number of redirects to follow
    pub const MAX_REDIRECTS: usize = 10;
}

/// Download validation constants
pub mod download {
    /// Leading bytes of every gzip stream
    pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

    /// Bytes read from the body before validation
    pub const PREFIX_LEN: usize = 4;

    /// Extra bytes read to build a diagnostic snippet on validation failure
    pub const SNIPPET_EXTRA_LEN: usize = 256;
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "qnx-fetcher.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "qnx-fetcher";

    /// File name under the user config dir
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

/// Logging constants
pub mod logging {
    /// Default log level. Stdout carries data for the helper, so keep quiet.
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use auth::{QNX_LOGIN_URL, SESSION_COOKIE};
pub use domain::REQUIRED_DOMAIN;
pub use env::{PASSWORD as ENV_PASSWORD, USERNAME as ENV_USERNAME};
pub use http::USER_AGENT;
