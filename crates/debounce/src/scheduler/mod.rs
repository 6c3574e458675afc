//! Deferred-execution primitives a debouncer schedules against
//!
//! A [`Scheduler`] runs a boxed task once a delay has elapsed and can cancel
//! it before that. Two implementations ship with the crate:
//! - [`VirtualScheduler`]: a simulated clock that only moves when told to
//! - [`TokioScheduler`]: sleeps on a tokio runtime

mod runtime;
mod virtual_clock;

pub use runtime::TokioScheduler;
pub use virtual_clock::{TimerId, VirtualScheduler};

use std::sync::Arc;
use std::time::Duration;

/// Work deferred by a scheduler
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Timer facility that can run a task later and cancel it before it runs
///
/// Implementations must never run `task` from inside `schedule`, even for a
/// zero delay. Cancelling a handle whose task already ran is a no-op.
pub trait Scheduler {
    /// Handle returned by `schedule`, consumed by `cancel`
    type Handle;

    /// Run `task` once `delay` has elapsed
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Cancel a scheduled task if it has not run yet
    fn cancel(&self, handle: Self::Handle);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    type Handle = S::Handle;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    type Handle = S::Handle;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle)
    }
}
