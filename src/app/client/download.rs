//! Authenticated download with gzip validation
//!
//! The first bytes of the body are checked against the gzip magic before the
//! destination is touched: an expired session or a server error page comes
//! back as HTML with a 200, and must not end up on disk as the asset. Once
//! validated, the body is copied to the destination byte for byte.

use std::path::Path;

use indicatif::ProgressBar;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use url::Url;

use crate::app::client::http::{ResponseBody, Transport};
use crate::constants::download::{GZIP_MAGIC, PREFIX_LEN, SNIPPET_EXTRA_LEN};
use crate::errors::{DownloadError, DownloadResult};

/// File download operations handler
pub struct DownloadHandler<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> DownloadHandler<'a, T> {
    /// Creates a new DownloadHandler over the given transport
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Downloads `url` to `destination`, returning the number of bytes written
    ///
    /// The destination is created (or truncated) only after the body passed
    /// validation. A failure while streaming leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The HTTP request fails
    /// - The body does not start with the gzip magic bytes
    /// - File I/O operations fail
    pub async fn download_file(
        &self,
        url: &Url,
        destination: &Path,
        progress: &ProgressBar,
    ) -> DownloadResult<u64> {
        let mut response = self.transport.get(url).await?;
        let status = response.status();
        let content_type = response.content_type();

        if let Some(length) = response.content_length() {
            progress.set_length(length);
        }

        let mut head = read_at_least(response.as_mut(), PREFIX_LEN).await?;

        if !head.starts_with(&GZIP_MAGIC) {
            let snippet = diagnostic_snippet(response.as_mut(), head).await;
            tracing::warn!(
                "Response from {} is not gzip (status {}, content type {:?})",
                url,
                status,
                content_type
            );
            return Err(DownloadError::UnexpectedContent {
                status,
                content_type,
                snippet,
            });
        }

        let file = File::create(destination).await?;
        let mut writer = BufWriter::new(file);

        writer.write_all(&head).await?;
        progress.inc(head.len() as u64);
        let head_len = head.len() as u64;
        head.clear();

        let streamed = stream_body(response.as_mut(), &mut writer, progress).await;

        // Flush even after a failed read so the partial file holds every byte received
        writer.flush().await?;
        let bytes_written = head_len + streamed?;

        tracing::info!(
            "Successfully downloaded {} bytes to {}",
            bytes_written,
            destination.display()
        );
        Ok(bytes_written)
    }
}

/// Copy the rest of the body into `writer`, returning the bytes copied
async fn stream_body(
    body: &mut dyn ResponseBody,
    writer: &mut BufWriter<File>,
    progress: &ProgressBar,
) -> DownloadResult<u64> {
    let mut copied = 0;
    while let Some(chunk) = body.next_chunk().await? {
        writer.write_all(&chunk).await?;
        copied += chunk.len() as u64;
        progress.inc(chunk.len() as u64);
    }
    Ok(copied)
}

/// Read chunks until at least `min_len` bytes are buffered or the body ends.
/// Everything read is returned, possibly more than `min_len`.
async fn read_at_least(body: &mut dyn ResponseBody, min_len: usize) -> DownloadResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(min_len);
    while buffer.len() < min_len {
        match body.next_chunk().await? {
            Some(chunk) => buffer.extend_from_slice(&chunk),
            None => break,
        }
    }
    Ok(buffer)
}

/// Lossily decoded start of a rejected body: the prefix plus up to
/// `SNIPPET_EXTRA_LEN` more bytes. Read errors just end the snippet early.
async fn diagnostic_snippet(body: &mut dyn ResponseBody, mut head: Vec<u8>) -> String {
    let limit = PREFIX_LEN + SNIPPET_EXTRA_LEN;
    while head.len() < limit {
        match body.next_chunk().await {
            Ok(Some(chunk)) => head.extend_from_slice(&chunk),
            _ => break,
        }
    }
    head.truncate(limit);
    String::from_utf8_lossy(&head).into_owned()
}
