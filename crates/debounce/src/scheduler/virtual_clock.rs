//! Simulated clock for deterministic scheduling
//!
//! Time starts at zero and only moves forward when the owner calls
//! [`VirtualScheduler::advance`]. Tests drive debouncers through exact
//! timelines without sleeping.

use super::{Scheduler, Task};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Handle to a timer on a [`VirtualScheduler`]
///
/// Orders by deadline first, then by scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    deadline: Duration,
    seq: u64,
}

impl TimerId {
    /// Virtual time at which the timer fires
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

/// Scheduler backed by a virtual clock
///
/// Clones share the same clock and timer queue, so a test can keep one
/// clone while a debouncer owns another.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Arc<Mutex<Clock>>,
}

#[derive(Default)]
struct Clock {
    /// Virtual time elapsed since creation
    now: Duration,

    /// Tie-breaker for timers sharing a deadline
    next_seq: u64,

    /// Outstanding timers in firing order
    timers: BTreeMap<TimerId, Task>,
}

impl VirtualScheduler {
    /// Create a scheduler whose clock reads zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of timers that have not fired or been cancelled
    pub fn pending(&self) -> usize {
        self.clock.lock().timers.len()
    }

    /// Deadline of the next timer to fire
    pub fn next_deadline(&self) -> Option<Duration> {
        self.clock
            .lock()
            .timers
            .first_key_value()
            .map(|(id, _)| id.deadline)
    }

    /// Move the clock forward by `by`, firing every timer that comes due
    ///
    /// Timers fire in deadline order with the clock set to each deadline in
    /// turn. Timers scheduled by a firing task run too if their deadline
    /// falls inside the window. A panicking task unwinds out of this call;
    /// the remaining timers stay queued.
    pub fn advance(&self, by: Duration) {
        let target = self.now().saturating_add(by);

        loop {
            let task = {
                let mut clock = self.clock.lock();
                let due = clock
                    .timers
                    .first_key_value()
                    .map(|(id, _)| *id)
                    .filter(|id| id.deadline <= target);
                match due {
                    Some(id) => {
                        clock.now = clock.now.max(id.deadline);
                        clock.timers.remove(&id)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };

            // Run without the lock so the task can schedule or cancel
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }

    /// Fire every timer that is already due without moving the clock
    pub fn run_pending(&self) {
        self.advance(Duration::ZERO);
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut clock = self.clock.lock();
        let id = TimerId {
            deadline: clock.now.saturating_add(delay),
            seq: clock.next_seq,
        };
        clock.next_seq += 1;
        clock.timers.insert(id, task);
        id
    }

    fn cancel(&self, handle: TimerId) {
        // Dropped outside the lock: the task may own arbitrary captures
        let removed = self.clock.lock().timers.remove(&handle);
        drop(removed);
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.lock();
        f.debug_struct("VirtualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.timers.len())
            .finish()
    }
}
