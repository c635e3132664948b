use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::stream;

use hashfetch::fetch::{digest_stream, Fetch};
use hashfetch::pool::Error;
use hashfetch::{Pool, PoolConfig};

/// MD5 digest of `tests/fixtures/example.com.html`.
const EXAMPLE_COM_DIGEST: &str = "69c3e22537d7e44ee673ac31ab716837";

/// Serve `http(s)://{host}` from `tests/fixtures/{host}.html`.
struct FixtureFetcher {
    dir: PathBuf,
}

impl FixtureFetcher {
    fn new() -> Self {
        Self {
            dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures"),
        }
    }
}

impl Fetch for FixtureFetcher {
    type Error = io::Error;

    async fn fetch(&self, url: &str) -> Result<String, io::Error> {
        let host = url.split_once("://").map_or(url, |(_, host)| host);
        let content = tokio::fs::read(self.dir.join(format!("{host}.html"))).await?;

        digest_stream(stream::iter([Ok(Bytes::from(content))])).await
    }
}

#[tokio::test]
async fn test_known_digest() {
    let results = Pool::new(["example.com"], PoolConfig::new(1)).collect(FixtureFetcher::new()).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "http://example.com");
    assert_eq!(results[0].digest, EXAMPLE_COM_DIGEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_known_digest_any_scheme() {
    for workers in [1, 2, 3, 100, 0, -1] {
        let pool = Pool::new(["example.com", "http://example.com", "https://example.com"], PoolConfig::new(workers));
        let mut results = pool.collect(FixtureFetcher::new()).await.unwrap();
        results.sort();

        let urls: Vec<_> = results.iter().map(|result| result.url.as_str()).collect();
        assert_eq!(urls, ["http://example.com", "http://example.com", "https://example.com"]);
        assert!(results.iter().all(|result| result.digest == EXAMPLE_COM_DIGEST));
    }
}

#[tokio::test]
async fn test_missing_fixture_fails_batch() {
    let pool = Pool::new(["example.com", "missing.example", "example.com"], PoolConfig::new(2));

    match pool.collect(FixtureFetcher::new()).await {
        Err(Error::Fetch { url, source }) => {
            assert_eq!(url, "http://missing.example");
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        res => panic!("unexpected outcome: {res:?}"),
    }
}
