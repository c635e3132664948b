//! Pool sizing.

use std::num::NonZeroUsize;

/// Worker count used when none, or a non-positive one, is requested.
pub const DEFAULT_WORKER_COUNT: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(10) };

/// Pool configuration.
///
/// The requested worker count is kept signed, as received from the command line, and only turned into an effective
/// count once the number of tasks is known, see [`PoolConfig::effective_workers()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Requested number of concurrent workers, `0` or less meaning [`PoolConfig::default_workers`].
    pub workers: i64,
    /// Fallback worker count.
    pub default_workers: NonZeroUsize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            default_workers: DEFAULT_WORKER_COUNT,
        }
    }
}

impl PoolConfig {
    /// Create a configuration requesting `workers` concurrent workers.
    pub fn new(workers: i64) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Build a configuration with another fallback worker count.
    #[inline]
    pub fn with_default_workers(self, default_workers: NonZeroUsize) -> Self {
        Self { default_workers, ..self }
    }

    /// Number of workers actually spawned for `task_count` tasks.
    ///
    /// - no task means no worker at all;
    /// - a positive request is capped to the number of tasks;
    /// - any other request falls back to [`PoolConfig::default_workers`].
    ///
    /// ```
    /// # use hashfetch::config::PoolConfig;
    /// assert_eq!(PoolConfig::new(3).effective_workers(10), 3);
    /// assert_eq!(PoolConfig::new(200).effective_workers(10), 10);
    /// assert_eq!(PoolConfig::new(-1).effective_workers(10), 10);
    /// assert_eq!(PoolConfig::new(5).effective_workers(0), 0);
    /// ```
    pub fn effective_workers(&self, task_count: usize) -> usize {
        if task_count == 0 {
            return 0;
        }

        match usize::try_from(self.workers) {
            Ok(0) | Err(_) => self.default_workers.get(),
            Ok(workers) => workers.min(task_count),
        }
    }
}
