//! Fetch a resource and digest its content.

use std::future::Future;

use bytes::Bytes;
use futures::future::TryFutureExt;
use futures::stream::{Stream, TryStreamExt};
use md5::{Digest, Md5};
use thiserror::Error;

pub use reqwest::Client;
pub use url::Url;

/// Fetch a resource given its normalized URL and return the hex digest of its content.
///
/// This is the only I/O performed by a pool worker: implementors must not rely on any state shared with other calls.
pub trait Fetch: Send + Sync + 'static {
    /// Error returned when a resource cannot be fetched.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch `url` and return its digest.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl<T: Fetch> Fetch for std::sync::Arc<T> {
    type Error = T::Error;

    #[inline]
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send {
        (**self).fetch(url)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Compute the lowercase hex MD5 digest of a byte stream, chunk after chunk.
///
/// ```
/// # tokio_test::block_on(async {
/// # use hashfetch::fetch::digest_stream;
/// let chunks = futures::stream::iter([Ok::<_, std::io::Error>(bytes::Bytes::from_static(b"hello\n"))]);
///
/// assert_eq!(digest_stream(chunks).await.unwrap(), "b1946ac92492d2347c6235b4d2611184");
/// # })
/// ```
pub async fn digest_stream<E>(stream: impl Stream<Item = Result<Bytes, E>>) -> Result<String, E> {
    let hasher = stream
        .try_fold(Md5::new(), |mut hasher, chunk| async move {
            hasher.update(&chunk);
            Ok(hasher)
        })
        .await?;

    Ok(hex::encode(hasher.finalize()))
}

/// Fetch resources over HTTP(S) with a plain `GET`, digesting the response body as it streams in.
///
/// No status code filtering is applied: whatever body the server answers with is digested.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_client(self, client: Client) -> Self {
        Self { client }
    }

    fn stream(&self, url: Url) -> impl Stream<Item = Result<Bytes, FetchError>> {
        self.client
            .get(url)
            .send()
            .map_ok(|resp| resp.bytes_stream())
            .try_flatten_stream()
            .err_into()
    }
}

impl Fetch for HttpFetcher {
    type Error = FetchError;

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = Url::parse(url)?;

        digest_stream(self.stream(url)).await
    }
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<Bytes, FetchError>> {
        stream::iter(parts.iter().copied().map(|part| Ok(Bytes::from_static(part))).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_digest_empty_stream() {
        assert_eq!(digest_stream(chunks(&[])).await.unwrap(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[tokio::test]
    async fn test_digest_is_chunking_independent() {
        let whole = digest_stream(chunks(&[b"The quick brown fox jumps over the lazy dog"])).await.unwrap();
        let split = digest_stream(chunks(&[b"The quick ", b"", b"brown fox jumps", b" over the lazy dog"])).await.unwrap();

        assert_eq!(whole, "9e107d9d372bb6826bd81d3542a419d6");
        assert_eq!(split, whole);
    }

    #[tokio::test]
    async fn test_digest_stream_error() {
        let failing = stream::iter([Ok(Bytes::from_static(b"partial")), Err("connection reset")]);

        assert_eq!(digest_stream(failing).await, Err("connection reset"));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let fetcher = HttpFetcher::new();

        assert!(matches!(fetcher.fetch("http://").await, Err(FetchError::InvalidUrl(_))));
    }
}
