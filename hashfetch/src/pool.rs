//! This module provides the bounded worker pool fetching and digesting a fixed list of URLs.

use std::future::Future;
use std::sync::Arc;

use futures::future::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::PoolConfig;
use crate::fetch::Fetch;
use crate::normalize::normalize_url;
use crate::queue::TaskQueue;
use crate::task::UrlDigest;

/// Error ending a whole batch.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// A resource could not be fetched.
    #[error("failed to fetch `{url}`")]
    Fetch {
        /// The normalized URL.
        url: String,
        #[source]
        source: E,
    },
    /// A worker terminated without reporting, most likely because a fetcher panicked.
    #[error("worker {worker} terminated abnormally")]
    WorkerFailed {
        worker: usize,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// A fixed-size pool of workers fetching and digesting a list of URLs.
///
/// The pool is sized once, at construction, from the number of identifiers and a [`PoolConfig`].
/// Work is then driven to completion by [`Pool::collect()`], which fails fast on the first error.
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// # use hashfetch::{config::PoolConfig, fetch::Fetch, pool::Pool};
/// struct Len;
///
/// impl Fetch for Len {
///     type Error = std::convert::Infallible;
///
///     async fn fetch(&self, url: &str) -> Result<String, Self::Error> {
///         Ok(url.len().to_string())
///     }
/// }
///
/// let pool = Pool::new(["a.com", "https://b.com"], PoolConfig::new(3));
/// assert_eq!(pool.workers(), 2);
///
/// let mut results = pool.collect(Len).await.unwrap();
/// results.sort();
///
/// assert_eq!(results[0].to_string(), "http://a.com 12");
/// assert_eq!(results[1].to_string(), "https://b.com 13");
/// # })
/// ```
#[derive(Debug)]
pub struct Pool {
    /// The tasks to process, one per identifier.
    queue: TaskQueue,
    /// The effective number of workers to spawn.
    workers: usize,
}

impl Pool {
    /// Build a pool for `identifiers`, sized after `config`.
    pub fn new<I>(identifiers: I, config: PoolConfig) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let queue = TaskQueue::new(identifiers);
        let workers = config.effective_workers(queue.len());

        Self { queue, workers }
    }

    /// Effective number of workers.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Total number of tasks.
    #[inline]
    pub fn task_count(&self) -> usize {
        self.queue.len()
    }

    /// Spawn the workers and collect their results.
    ///
    /// Returns every `(url, digest)` pair, in completion order, once all workers have drained the queue.
    /// As soon as any worker reports an error, it is returned instead and the results collected so far are dropped.
    ///
    /// Workers still running when this method returns, or when its future is dropped, are aborted.
    pub async fn collect<F: Fetch>(self, fetcher: F) -> Result<Vec<UrlDigest>, Error<F::Error>> {
        let total = self.queue.len();
        let mut collected = Vec::with_capacity(total);

        if self.workers == 0 {
            return Ok(collected);
        }

        let fetcher = Arc::new(fetcher);
        let (result_sender, mut results) = mpsc::channel(self.workers);
        let (error_sender, mut errors) = mpsc::unbounded_channel();

        let mut workers: FuturesUnordered<_> = (1..=self.workers)
            .map(|id| {
                Worker::new(
                    id,
                    self.queue.clone(),
                    Arc::clone(&fetcher),
                    result_sender.clone(),
                    error_sender.clone(),
                )
            })
            .collect();

        // only workers hold senders from now on
        drop((result_sender, error_sender));

        // errors take precedence over results, which take precedence over worker completion:
        // the pool is drained only once every worker is known to have completed in an earlier iteration
        loop {
            tokio::select! {
                biased;

                Some(error) = errors.recv() => {
                    tracing::debug!("Aborting batch after {}/{total} results.", collected.len());

                    return Err(error);
                }
                Some(result) = results.recv() => {
                    tracing::trace!("Collected {}/{total}: {result}", collected.len() + 1);

                    collected.push(result);
                }
                joined = workers.next() => match joined {
                    Some((id, Ok(()))) => {
                        tracing::debug!("Worker {id} done, {} remaining.", workers.len());
                    }
                    Some((worker, Err(source))) => {
                        tracing::warn!("Aborting batch after {}/{total} results: worker {worker} failed", collected.len());

                        return Err(Error::WorkerFailed { worker, source });
                    }
                    None => {
                        debug_assert_eq!(collected.len(), total);

                        return Ok(collected);
                    }
                },
            }
        }
    }
}

#[derive(Debug)]
struct Worker {
    id: usize,
    handle: tokio::task::JoinHandle<()>,
}

impl Worker {
    fn new<F: Fetch>(
        id: usize,
        queue: TaskQueue,
        fetcher: Arc<F>,
        results: mpsc::Sender<UrlDigest>,
        errors: mpsc::UnboundedSender<Error<F::Error>>,
    ) -> Worker {
        tracing::debug!("Starting worker {id}...");

        Worker {
            id,
            handle: tokio::spawn(async move {
                while let Some(task) = queue.claim().await {
                    let url = normalize_url(task.identifier());

                    tracing::debug!("Worker {id} processing `{}` (normalized to `{url}`)", task.identifier());

                    match fetcher.fetch(&url).await {
                        Ok(digest) => {
                            if results.send(UrlDigest { url, digest }).await.is_err() {
                                tracing::debug!("Results no longer collected, shutting down worker {id}.");
                                return;
                            }
                        }
                        Err(source) => {
                            tracing::debug!("Fetch error reported, shutting down worker {id}.");

                            let _ = errors.send(Error::Fetch { url, source });
                            return;
                        }
                    }
                }

                tracing::debug!("All tasks exhausted, shutting down worker {id}.");
            }),
        }
    }
}

impl Future for Worker {
    type Output = (usize, Result<(), tokio::task::JoinError>);

    #[inline]
    fn poll(mut self: std::pin::Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> std::task::Poll<Self::Output> {
        let id = self.id;
        self.handle.poll_unpin(cx).map(|res| (id, res))
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // no-op once the task has completed
        self.handle.abort();
    }
}
