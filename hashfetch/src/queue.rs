//! The closed, pre-filled source of work shared by all workers.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::task::Task;

/// A fixed queue of [`Task`]s, filled once at construction and closed for writing.
///
/// Cloning a `TaskQueue` yields another handle on the same queue, so that every task is claimed by exactly one worker.
/// Once drained, [`TaskQueue::claim()`] returns `None` immediately instead of waiting for more work.
///
/// ```
/// # tokio_test::block_on(async {
/// # use hashfetch::queue::TaskQueue;
/// let queue = TaskQueue::new(["a.com", "b.com"]);
///
/// assert_eq!(queue.claim().await.unwrap().identifier(), "a.com");
/// assert_eq!(queue.claim().await.unwrap().identifier(), "b.com");
/// assert!(queue.claim().await.is_none());
/// # })
/// ```
#[derive(Debug, Clone)]
pub struct TaskQueue {
    /// The receiving part of a closed channel holding the pending tasks.
    ///
    /// Its sending part is dropped as soon as the channel is filled, so `recv()` never waits on an empty queue.
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Task>>>,
    /// Number of tasks the queue was built with.
    len: usize,
}

impl TaskQueue {
    /// Build a queue holding one [`Task`] per identifier, in the given order.
    pub fn new<I>(identifiers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let (sender, receiver) = mpsc::unbounded_channel();

        // the receiver is alive, every send succeeds
        let len = identifiers.into_iter().map(Task::new).map(|task| sender.send(task)).take_while(Result::is_ok).count();

        drop(sender);

        Self {
            receiver: Arc::new(Mutex::new(receiver)),
            len,
        }
    }

    /// Total number of tasks this queue was built with, claimed or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Claim the next pending task, or `None` if the queue is exhausted.
    pub async fn claim(&self) -> Option<Task> {
        self.receiver.lock().await.recv().await
    }
}
