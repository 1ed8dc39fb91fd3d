//! Periodic tick scheduling.
//!
//! A [`Scheduler`] hands out a [`TickHandle`] for every periodic schedule it
//! arms. The host delivers ticks back to the countdown together with that
//! handle, and the countdown ignores any tick whose handle is no longer
//! current. A tick that was already queued when the schedule was cancelled
//! therefore never acts.

use std::time::Duration;

/// Default tick period.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one armed periodic schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Arms and cancels periodic ticks.
pub trait Scheduler {
    /// Starts ticking every `period` and returns the handle ticks will carry.
    fn schedule_every(&mut self, period: Duration) -> TickHandle;

    /// Stops the schedule identified by `handle`.
    fn cancel(&mut self, handle: TickHandle);
}

impl<T: Scheduler + ?Sized> Scheduler for &mut T {
    fn schedule_every(&mut self, period: Duration) -> TickHandle {
        (**self).schedule_every(period)
    }

    fn cancel(&mut self, handle: TickHandle) {
        (**self).cancel(handle)
    }
}

/// A [`Scheduler`] that never fires on its own.
///
/// It records what was asked of it; the host (or a test) reads
/// [`ManualScheduler::armed`] and delivers ticks itself.
///
/// ```rust
/// use bubbletea_countdown::scheduler::{ManualScheduler, Scheduler};
/// use std::time::Duration;
///
/// let mut scheduler = ManualScheduler::new();
/// let handle = scheduler.schedule_every(Duration::from_secs(1));
/// assert_eq!(scheduler.armed(), Some((handle, Duration::from_secs(1))));
///
/// scheduler.cancel(handle);
/// assert_eq!(scheduler.armed(), None);
/// assert_eq!(scheduler.cancel_calls(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next: u64,
    armed: Option<(TickHandle, Duration)>,
    schedule_calls: usize,
    cancel_calls: usize,
}

impl ManualScheduler {
    /// Creates a scheduler with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently armed schedule and its period.
    pub fn armed(&self) -> Option<(TickHandle, Duration)> {
        self.armed
    }

    /// How many times [`Scheduler::schedule_every`] was called.
    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls
    }

    /// How many times [`Scheduler::cancel`] was called.
    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_every(&mut self, period: Duration) -> TickHandle {
        self.next += 1;
        self.schedule_calls += 1;
        let handle = TickHandle(self.next);
        self.armed = Some((handle, period));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.cancel_calls += 1;
        if matches!(self.armed, Some((armed, _)) if armed == handle) {
            self.armed = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.schedule_every(DEFAULT_PERIOD);
        let b = scheduler.schedule_every(DEFAULT_PERIOD);
        assert_ne!(a, b);
        assert_eq!(scheduler.armed(), Some((b, DEFAULT_PERIOD)));
        assert_eq!(scheduler.schedule_calls(), 2);
    }

    #[test]
    fn test_cancel_of_stale_handle_keeps_current_schedule() {
        let mut scheduler = ManualScheduler::new();
        let old = scheduler.schedule_every(DEFAULT_PERIOD);
        let current = scheduler.schedule_every(Duration::from_millis(250));

        scheduler.cancel(old);
        assert_eq!(
            scheduler.armed(),
            Some((current, Duration::from_millis(250)))
        );
    }
}
