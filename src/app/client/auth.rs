//! qnx.com login flow
//!
//! Posts the login form and inspects the resulting cookie jar. The login page
//! answers 200 for bad credentials too, so the `myQNX` cookie, not the status,
//! is what proves the login worked.

use url::Url;

use crate::app::client::http::Transport;
use crate::app::models::CookieJar;
use crate::auth::Credentials;
use crate::constants::auth;
use crate::errors::{AuthError, AuthResult};

/// Handles qnx.com authentication operations
pub struct AuthHandler;

impl AuthHandler {
    /// Log in and return the cookies captured for the login host
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if:
    /// - The login request cannot be sent
    /// - The login endpoint answers with a status other than 200
    /// - No `myQNX` cookie was issued
    pub async fn login<T>(
        transport: &T,
        login_url: &Url,
        credentials: &Credentials,
    ) -> AuthResult<CookieJar>
    where
        T: Transport + ?Sized,
    {
        tracing::info!("Logging in to {}", login_url);

        let form = [
            (auth::FORM_USER_FIELD, credentials.username.as_str()),
            (auth::FORM_PASSWORD_FIELD, credentials.password.as_str()),
            (auth::FORM_USE_COOKIE_FIELD, "1"),
        ];
        let status = transport.post_form(login_url, &form).await?;

        if status != 200 {
            tracing::warn!("Login failed with status {}", status);
            return Err(AuthError::LoginFailed { status });
        }

        let cookies = transport.cookies();
        tracing::debug!("Cookies after login: {:?}", cookies);

        if !cookies.contains(auth::SESSION_COOKIE) {
            tracing::warn!(
                "Login answered 200 but set no {} cookie",
                auth::SESSION_COOKIE
            );
            return Err(AuthError::MissingSessionCookie {
                cookie: auth::SESSION_COOKIE.to_string(),
            });
        }

        tracing::info!("Successfully authenticated with qnx.com");
        Ok(cookies)
    }

    /// The fixed login endpoint
    pub fn login_url() -> AuthResult<Url> {
        Url::parse(auth::QNX_LOGIN_URL).map_err(|e| AuthError::InvalidUrl {
            url: auth::QNX_LOGIN_URL.to_string(),
            error: e.to_string(),
        })
    }
}
