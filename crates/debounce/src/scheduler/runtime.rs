//! Tokio-backed scheduler
//!
//! Each scheduled task becomes a spawned tokio task that sleeps for the
//! delay and then runs. Cancellation aborts the spawned task.

use super::{Scheduler, Task};
use crate::error::Result;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// Scheduler that defers work onto a tokio runtime
///
/// Deferred tasks either go to the runtime's worker pool ([`current`],
/// [`from_handle`]) or stay on the calling thread's `LocalSet` ([`local`]).
///
/// On a multi-thread runtime a pooled task can start on another worker as
/// soon as it is spawned. With a zero delay it may then fire before the
/// caller's next synchronous call supersedes it, so a same-frame burst can
/// fire more than once. Use [`local`] when zero-delay bursts must collapse
/// regardless of runtime flavor.
///
/// A panic inside a deferred task is caught by the runtime and surfaces as
/// that task's `JoinError`; nothing awaits it, so the caller of the
/// debouncer never sees it.
///
/// [`current`]: TokioScheduler::current
/// [`from_handle`]: TokioScheduler::from_handle
/// [`local`]: TokioScheduler::local
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    spawner: Spawner,
}

#[derive(Debug, Clone)]
enum Spawner {
    /// Any worker of this runtime
    Runtime(Handle),
    /// The `LocalSet` driving the scheduling thread
    Local,
}

impl TokioScheduler {
    /// Scheduler for the runtime the caller is running on
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn current() -> Self {
        Self::from_handle(Handle::current())
    }

    /// Scheduler for the current runtime, or `NoRuntime` outside one
    pub fn try_current() -> Result<Self> {
        Ok(Self::from_handle(Handle::try_current()?))
    }

    /// Scheduler for an explicit runtime handle
    pub fn from_handle(runtime: Handle) -> Self {
        Self {
            spawner: Spawner::Runtime(runtime),
        }
    }

    /// Scheduler that keeps deferred tasks on the calling thread
    ///
    /// Tasks run only when the surrounding `LocalSet` gets polled, that is
    /// after the caller yields, so synchronous bursts always collapse.
    ///
    /// # Panics
    ///
    /// `schedule` panics when not called from inside a `LocalSet`, like
    /// `tokio::task::spawn_local`.
    pub fn local() -> Self {
        Self {
            spawner: Spawner::Local,
        }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, task: Task) -> JoinHandle<()> {
        trace!("Scheduling deferred task in {:?}", delay);

        let deferred = async move {
            tokio::time::sleep(delay).await;
            trace!("Deferred task firing after {:?}", delay);
            task();
        };

        // Even a zero delay goes through spawn, so it never runs inline
        match &self.spawner {
            Spawner::Runtime(runtime) => runtime.spawn(deferred),
            Spawner::Local => tokio::task::spawn_local(deferred),
        }
    }

    fn cancel(&self, handle: JoinHandle<()>) {
        if !handle.is_finished() {
            trace!("Cancelling deferred task");
        }
        handle.abort();
    }
}
