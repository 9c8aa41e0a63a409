//! HTTP transport seam
//!
//! All network I/O of the session client goes through [`Transport`], so the
//! login and download flows can run against an in-memory fake in tests. The
//! production implementation, [`HttpTransport`], wraps a `reqwest::Client`
//! with a shared cookie store: every cookie set during the login exchange,
//! including on redirects, is kept and sent on the download request.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use url::Url;

use crate::app::client::config::ClientConfig;
use crate::app::client::cookies::SessionCookieStore;
use crate::app::models::CookieJar;
use crate::errors::{AuthError, AuthResult, DownloadError, DownloadResult};

/// Network operations needed by the session client
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST an url-encoded form and return the final HTTP status
    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> AuthResult<u16>;

    /// Every cookie received so far, whatever its domain or path
    fn cookies(&self) -> CookieJar;

    /// GET `url` with the transport's cookies, returning the streaming body
    async fn get(&self, url: &Url) -> DownloadResult<Box<dyn ResponseBody>>;
}

/// A response whose body is read chunk by chunk
#[async_trait]
pub trait ResponseBody: Send {
    fn status(&self) -> u16;

    /// Declared `Content-Type`, if any
    fn content_type(&self) -> Option<String>;

    /// Declared `Content-Length`, if any
    fn content_length(&self) -> Option<u64>;

    /// Next chunk of the body, `None` at end of stream
    async fn next_chunk(&mut self) -> DownloadResult<Option<Vec<u8>>>;
}

#[async_trait]
impl ResponseBody for Response {
    fn status(&self) -> u16 {
        Response::status(self).as_u16()
    }

    fn content_type(&self) -> Option<String> {
        self.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    fn content_length(&self) -> Option<u64> {
        Response::content_length(self)
    }

    async fn next_chunk(&mut self) -> DownloadResult<Option<Vec<u8>>> {
        let chunk = self.chunk().await.map_err(DownloadError::Http)?;
        Ok(chunk.map(|bytes| bytes.to_vec()))
    }
}

/// `reqwest`-backed transport with a per-instance cookie store
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    cookie_store: Arc<SessionCookieStore>,
}

impl HttpTransport {
    /// Creates a transport with an empty cookie store
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> AuthResult<Self> {
        let cookie_store = Arc::new(SessionCookieStore::new());
        let client = config.build_http_client(Arc::clone(&cookie_store))?;
        Ok(Self {
            client,
            cookie_store,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> AuthResult<u16> {
        let response = self
            .client
            .post(url.as_str())
            .form(form)
            .send()
            .await
            .map_err(AuthError::Http)?;

        tracing::debug!(
            "Form POST {} answered {} (final URL {})",
            url,
            response.status(),
            response.url()
        );
        Ok(response.status().as_u16())
    }

    fn cookies(&self) -> CookieJar {
        self.cookie_store.received()
    }

    async fn get(&self, url: &Url) -> DownloadResult<Box<dyn ResponseBody>> {
        let response = self.client.get(url.as_str()).send().await?;
        tracing::debug!("GET {} answered {}", url, response.status());
        Ok(Box::new(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_form_captures_cookies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/account/login.html"))
            .and(body_string_contains("userlogin=alice"))
            .and(body_string_contains("UseCookie=1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Set-Cookie", "myQNX=token-123; Path=/")
                    .set_body_string("<html>welcome</html>"),
            )
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/account/login.html", mock_server.uri())).unwrap();

        let status = transport
            .post_form(
                &url,
                &[("userlogin", "alice"), ("password", "pw"), ("UseCookie", "1")],
            )
            .await
            .unwrap();

        assert_eq!(status, 200);
        assert_eq!(transport.cookies().session_cookie(), Some("token-123"));
    }

    #[tokio::test]
    async fn test_cookie_scoped_to_another_path_is_captured() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/account/login.html"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Set-Cookie", "myQNX=tok; Path=/download"),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/download/sdp.tar.gz"))
            .and(header("cookie", "myQNX=tok"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x1F, 0x8B]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let login_url = Url::parse(&format!("{}/account/login.html", mock_server.uri())).unwrap();
        transport.post_form(&login_url, &[]).await.unwrap();

        assert_eq!(transport.cookies().session_cookie(), Some("tok"));

        let file_url = Url::parse(&format!("{}/download/sdp.tar.gz", mock_server.uri())).unwrap();
        let body = transport.get(&file_url).await.unwrap();
        assert_eq!(body.status(), 200);
    }

    #[tokio::test]
    async fn test_get_sends_captured_cookies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Set-Cookie", "myQNX=abc; Path=/"),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/file.tar.gz"))
            .and(header("cookie", "myQNX=abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/gzip")
                    .set_body_bytes(vec![0x1F, 0x8B, 0x08, 0x00, 0x01]),
            )
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let login_url = Url::parse(&format!("{}/login", mock_server.uri())).unwrap();
        transport.post_form(&login_url, &[]).await.unwrap();

        let file_url = Url::parse(&format!("{}/file.tar.gz", mock_server.uri())).unwrap();
        let mut body = transport.get(&file_url).await.unwrap();
        assert_eq!(body.status(), 200);
        assert_eq!(body.content_type().as_deref(), Some("application/gzip"));
        assert_eq!(body.content_length(), Some(5));

        let mut received = Vec::new();
        while let Some(chunk) = body.next_chunk().await.unwrap() {
            received.extend(chunk);
        }
        assert_eq!(received, vec![0x1F, 0x8B, 0x08, 0x00, 0x01]);
    }

    #[tokio::test]
    async fn test_no_cookies_before_login() {
        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        assert!(transport.cookies().is_empty());
    }
}
