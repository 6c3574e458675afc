//! Trailing-edge debouncing
//!
//! A [`Debouncer`] wraps a callback so a burst of calls collapses into a
//! single execution once the calls go quiet for the configured delay:
//! - Every call replaces the pending arguments and restarts the countdown
//! - The callback fires once, with the arguments of the last call
//! - After firing the debouncer is idle and can be armed again

use crate::scheduler::Scheduler;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Whether a debouncer has a countdown running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No countdown; the callback will not run until the next call
    Idle,
    /// Countdown running with arguments stored
    Armed,
}

/// Debounced wrapper around a callback
///
/// Multi-argument callbacks take a tuple:
///
/// ```
/// use debounce::{Debouncer, VirtualScheduler};
/// use std::time::Duration;
///
/// let clock = VirtualScheduler::new();
/// let save = Debouncer::new(
///     |(name, size): (String, u32)| println!("saving {name} ({size} bytes)"),
///     Duration::from_millis(100),
///     clock.clone(),
/// );
///
/// save.call(("draft".to_string(), 10));
/// save.call(("draft".to_string(), 12));
/// clock.advance(Duration::from_millis(100)); // prints once, with 12
/// ```
///
/// Dropping the debouncer does not cancel a running countdown: the deferred
/// task owns the callback and still fires.
pub struct Debouncer<F, A, S: Scheduler> {
    /// Callback and pending slot, shared with the deferred task
    shared: Arc<Shared<F, A, S::Handle>>,

    /// Quiet period before the callback fires
    delay: Duration,

    /// Deferred-execution facility
    scheduler: S,
}

struct Shared<F, A, H> {
    callback: F,
    pending: Mutex<PendingInvocation<A, H>>,
}

/// The one in-flight call a debouncer may hold
///
/// `args` and `handle` are set together while armed. `generation` moves on
/// every call; a deferred task carrying an older generation is stale.
struct PendingInvocation<A, H> {
    args: Option<A>,
    handle: Option<H>,
    generation: u64,
}

impl<A, H> PendingInvocation<A, H> {
    fn idle() -> Self {
        Self {
            args: None,
            handle: None,
            generation: 0,
        }
    }
}

/// Wrap `callback` so it only fires after `delay` of quiet
///
/// Shorthand for [`Debouncer::new`].
pub fn debounce<F, A, S>(callback: F, delay: Duration, scheduler: S) -> Debouncer<F, A, S>
where
    F: Fn(A) + Send + Sync + 'static,
    A: Send + 'static,
    S: Scheduler,
    S::Handle: Send + 'static,
{
    Debouncer::new(callback, delay, scheduler)
}

impl<F, A, S> Debouncer<F, A, S>
where
    F: Fn(A) + Send + Sync + 'static,
    A: Send + 'static,
    S: Scheduler,
    S::Handle: Send + 'static,
{
    /// Create an idle debouncer
    pub fn new(callback: F, delay: Duration, scheduler: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                callback,
                pending: Mutex::new(PendingInvocation::idle()),
            }),
            delay,
            scheduler,
        }
    }

    /// Request a call with `args`
    ///
    /// Replaces any pending arguments and restarts the countdown. Never runs
    /// the callback inline, even with a zero delay.
    pub fn call(&self, args: A) {
        let (generation, superseded, replaced) = {
            let mut pending = self.shared.pending.lock();
            pending.generation = pending.generation.wrapping_add(1);
            let replaced = pending.args.replace(args);
            (pending.generation, pending.handle.take(), replaced)
        };
        drop(replaced);

        match superseded {
            Some(handle) => {
                trace!(generation, "Debounce re-armed");
                self.scheduler.cancel(handle);
            }
            None => trace!(generation, "Debounce armed"),
        }

        let shared = Arc::clone(&self.shared);
        let handle = self
            .scheduler
            .schedule(self.delay, Box::new(move || shared.fire(generation)));

        let mut pending = self.shared.pending.lock();
        // The task may already have fired on another thread
        if pending.generation == generation && pending.args.is_some() {
            pending.handle = Some(handle);
        }
    }

    /// Turn the debouncer into a plain callable
    pub fn into_fn(self) -> impl Fn(A) + Send + Sync + 'static
    where
        S: Send + Sync + 'static,
    {
        move |args| self.call(args)
    }
}

impl<F, A, S: Scheduler> Debouncer<F, A, S> {
    /// Whether a countdown is running
    pub fn state(&self) -> DebounceState {
        if self.shared.pending.lock().args.is_some() {
            DebounceState::Armed
        } else {
            DebounceState::Idle
        }
    }

    /// Quiet period before the callback fires
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<F, A, H> Shared<F, A, H>
where
    F: Fn(A),
{
    fn fire(&self, generation: u64) {
        let (args, handle) = {
            let mut pending = self.pending.lock();
            if pending.generation != generation {
                trace!(generation, "Skipping superseded debounce task");
                return;
            }
            (pending.args.take(), pending.handle.take())
        };
        drop(handle);

        // Lock released: the callback may call the debouncer again
        if let Some(args) = args {
            trace!(generation, "Debounce fired");
            (self.callback)(args);
        }
    }
}

impl<F, A, S: Scheduler> fmt::Debug for Debouncer<F, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("state", &self.state())
            .finish()
    }
}
