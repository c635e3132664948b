//! A simple crate fetching a fixed list of URLs concurrently and digesting their content.
//!
//! The core of the crate is a bounded worker [`Pool`](pool::Pool):
//! - every identifier becomes a [`Task`](task::Task) in a pre-filled, closed [`TaskQueue`](queue::TaskQueue);
//! - a fixed number of workers, sized once by a [`PoolConfig`](config::PoolConfig), drain the queue concurrently;
//! - each worker [normalizes](normalize::normalize_url) its identifier, then [fetches](fetch::Fetch) and digests the resource;
//! - a single collector multiplexes results, errors and worker completion, and returns either all results or the first error.
//!
//! Any single failure aborts the whole batch: results collected so far are discarded and the remaining workers are aborted.
//! Results come out in completion order, not in input order.
//!
//! ```text
//!     identifiers ──> TaskQueue ──┬──> worker 1 ──┐
//!                                 ├──> worker 2 ──┼──> results / errors ──> collector ──> Vec<UrlDigest> | Error
//!                                 └──> worker N ──┘
//! ```

pub mod config;
pub mod fetch;
pub mod normalize;
pub mod pool;
pub mod queue;
pub mod report;
pub mod task;

pub use config::PoolConfig;
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use pool::Pool;
pub use task::UrlDigest;
