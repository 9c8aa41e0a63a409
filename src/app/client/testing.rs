//! In-memory transport for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::app::client::http::{ResponseBody, Transport};
use crate::app::models::CookieJar;
use crate::constants::auth;
use crate::errors::{AuthResult, DownloadError, DownloadResult};

type RecordedPost = (String, Vec<(String, String)>);

/// Scripted response body
#[derive(Debug, Clone)]
pub struct FakeBody {
    status: u16,
    content_type: Option<String>,
    content_length: Option<u64>,
    chunks: VecDeque<Vec<u8>>,
    fail_at_end: bool,
}

impl FakeBody {
    /// Body delivered as a single chunk
    pub fn whole(status: u16, content_type: Option<&str>, payload: &[u8]) -> Self {
        Self::chunked(status, content_type, payload, &[payload.len().max(1)])
    }

    /// Body split by `sizes`; the last size repeats until the payload is used up
    pub fn chunked(
        status: u16,
        content_type: Option<&str>,
        payload: &[u8],
        sizes: &[usize],
    ) -> Self {
        let mut chunks = VecDeque::new();
        let mut offset = 0;
        let mut index = 0;
        while offset < payload.len() {
            let size = sizes[index.min(sizes.len() - 1)].max(1);
            let end = (offset + size).min(payload.len());
            chunks.push_back(payload[offset..end].to_vec());
            offset = end;
            index += 1;
        }
        Self {
            status,
            content_type: content_type.map(str::to_string),
            content_length: None,
            chunks,
            fail_at_end: false,
        }
    }

    /// Declare a `Content-Length` matching the payload
    pub fn with_content_length(mut self) -> Self {
        self.content_length = Some(self.chunks.iter().map(|c| c.len() as u64).sum());
        self
    }

    /// Fail with a connection reset once the scripted chunks are used up
    pub fn failing_at_end(mut self) -> Self {
        self.fail_at_end = true;
        self
    }
}

#[async_trait]
impl ResponseBody for FakeBody {
    fn status(&self) -> u16 {
        self.status
    }

    fn content_type(&self) -> Option<String> {
        self.content_type.clone()
    }

    fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    async fn next_chunk(&mut self) -> DownloadResult<Option<Vec<u8>>> {
        match self.chunks.pop_front() {
            Some(chunk) => Ok(Some(chunk)),
            None if self.fail_at_end => Err(DownloadError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))),
            None => Ok(None),
        }
    }
}

/// Transport answering the login POST and one GET from a script, recording
/// every request it sees
#[derive(Debug)]
pub struct FakeTransport {
    login_status: u16,
    login_cookie: Option<String>,
    download: Mutex<Option<FakeBody>>,
    logged_in: AtomicBool,
    posts: Mutex<Vec<RecordedPost>>,
    gets: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            login_status: 200,
            login_cookie: None,
            download: Mutex::new(None),
            logged_in: AtomicBool::new(false),
            posts: Mutex::new(Vec::new()),
            gets: Mutex::new(Vec::new()),
        }
    }

    /// Status and `myQNX` value (if any) returned by the login POST
    pub fn with_login(mut self, status: u16, cookie: Option<&str>) -> Self {
        self.login_status = status;
        self.login_cookie = cookie.map(str::to_string);
        self
    }

    pub fn with_download(self, body: FakeBody) -> Self {
        *self.download.lock().unwrap() = Some(body);
        self
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    /// Whether any request at all reached the transport
    pub fn untouched(&self) -> bool {
        self.posts.lock().unwrap().is_empty() && self.gets.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> AuthResult<u16> {
        self.posts.lock().unwrap().push((
            url.to_string(),
            form.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self.logged_in.store(true, Ordering::SeqCst);
        Ok(self.login_status)
    }

    fn cookies(&self) -> CookieJar {
        let mut jar = CookieJar::new();
        if self.logged_in.load(Ordering::SeqCst) {
            jar.insert("PHPSESSID", "unrelated");
            if let Some(value) = &self.login_cookie {
                jar.insert(auth::SESSION_COOKIE, value.clone());
            }
        }
        jar
    }

    async fn get(&self, url: &Url) -> DownloadResult<Box<dyn ResponseBody>> {
        self.gets.lock().unwrap().push(url.to_string());
        let body = self
            .download
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| FakeBody::whole(404, Some("text/html"), b"Not Found"));
        Ok(Box::new(body))
    }
}
