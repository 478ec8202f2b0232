//! Task manager for async operations
//!
//! Provides lifecycle management for async tasks with support for:
//! - Automatic replacement when spawning with the same key
//! - Debounced execution
//! - Cooperative cancellation through a [`CancellationToken`]
//!
//! # Example
//!
//! ```ignore
//! use bistro_core::tasks::TaskManager;
//! use std::time::Duration;
//!
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! // The task gets a token and decides what to report when it fires
//! tasks.spawn("checkout", |token| async move {
//!     match backend.submit(Workflow::Checkout, &token).await {
//!         Ok(()) => Action::CheckoutDidComplete(order),
//!         Err(SubmitError::Cancelled) => Action::CheckoutDidCancel,
//!         Err(SubmitError::Rejected(reason)) => Action::CheckoutDidFail(reason),
//!     }
//! });
//!
//! // Debounced task - waits before executing, resets on each call
//! tasks.debounce("notice", Duration::from_secs(4), |_| async { Action::NoticeDismiss });
//!
//! // Ask a task to wind down; it still reports its result
//! tasks.cancel(&"checkout".into());
//!
//! // Stop everything (e.g., on shutdown)
//! tasks.cancel_all();
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::action::Action;

/// Identifies a task for cancellation and replacement.
///
/// Tasks with the same key are mutually exclusive - spawning a new task
/// with a key that's already running will stop the existing task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

struct RunningTask {
    handle: JoinHandle<()>,
    token: CancellationToken,
}

impl RunningTask {
    fn stop(self) {
        self.token.cancel();
        self.handle.abort();
    }
}

/// Manages async task lifecycle.
///
/// Two ways to stop a task:
/// - [`cancel`](Self::cancel) fires the task's token; the task observes it
///   and still sends whatever action it produces for that case.
/// - Replacing a key, [`cancel_all`](Self::cancel_all) and dropping the
///   manager abort outright; nothing is sent.
///
/// # Type Parameters
///
/// - `A`: The action type that tasks produce
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, RunningTask>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Create a new task manager.
    ///
    /// The `action_tx` channel is used to send actions back to the main loop
    /// when tasks complete.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, replacing any existing task with the same key.
    ///
    /// `task` receives the cancellation token for this run and returns the
    /// future whose output is sent to the action channel.
    pub fn spawn<F, Fut>(&mut self, key: impl Into<TaskKey>, task: F) -> &mut Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        let token = CancellationToken::new();
        let future = task(token.clone());
        self.start(key, token, async move { Some(future.await) });
        self
    }

    /// Spawn a task with debounce - waits for duration before executing.
    ///
    /// If called again with the same key before the duration expires,
    /// the previous task is dropped and the timer resets. Cancelling while
    /// waiting sends nothing.
    pub fn debounce<F, Fut>(
        &mut self,
        key: impl Into<TaskKey>,
        duration: Duration,
        task: F,
    ) -> &mut Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        let token = CancellationToken::new();
        let future = task(token.clone());
        let wait = token.clone();
        self.start(key, token, async move {
            tokio::select! {
                _ = wait.cancelled() => None,
                _ = tokio::time::sleep(duration) => Some(future.await),
            }
        });
        self
    }

    fn start<Fut>(&mut self, key: TaskKey, token: CancellationToken, future: Fut)
    where
        Fut: Future<Output = Option<A>> + Send + 'static,
    {
        if let Some(previous) = self.tasks.remove(&key) {
            tracing::debug!(task = %key.name(), "replacing running task");
            previous.stop();
        }

        let tx = self.action_tx.clone();
        let name = key.name().to_string();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            if let Some(action) = future.await {
                tracing::trace!(task = %name, action = action.name(), "task finished");
                let _ = tx.send(action);
            }
        });

        self.tasks.insert(key, RunningTask { handle, token });
    }

    /// Fire the cancellation token of a task.
    ///
    /// If no task exists with the given key, this is a no-op. Returns
    /// whether a task was signalled.
    pub fn cancel(&mut self, key: &TaskKey) -> bool {
        match self.tasks.remove(key) {
            Some(task) => {
                tracing::debug!(task = %key.name(), "cancelling task");
                task.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Abort all tasks without waiting for their results.
    ///
    /// Useful for cleanup on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.stop();
        }
    }

    /// Check if a task with the given key is still running.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|task| !task.handle.is_finished())
    }

    /// Get the number of running tasks.
    pub fn len(&self) -> usize {
        self.tasks
            .values()
            .filter(|task| !task.handle.is_finished())
            .count()
    }

    /// Check if there are no running tasks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the keys of all running tasks.
    pub fn running_keys(&self) -> impl Iterator<Item = &TaskKey> {
        self.tasks
            .iter()
            .filter(|(_, task)| !task.handle.is_finished())
            .map(|(key, _)| key)
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.stop();
        }
    }
}
