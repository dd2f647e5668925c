//! Fixed-interval timers driven by the host's elapsed time.
//!
//! Nothing here reads a clock. The host reports how much time passed and
//! each timer answers how many of its periods completed, so tests can
//! single-step an animation without sleeping.

use std::collections::BTreeMap;
use std::time::Duration;

/// Shortest allowed period.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating timer that accumulates elapsed time into whole periods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    accumulated: Duration,
    running: bool,
}

impl IntervalTimer {
    /// Creates a stopped timer. Periods below [`MIN_PERIOD`] are raised to it.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            accumulated: Duration::ZERO,
            running: false,
        }
    }

    /// Creates a timer that is already running.
    pub fn started(period: Duration) -> Self {
        let mut t = Self::new(period);
        t.start();
        t
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops the timer and drops any partially accumulated period.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Feeds `dt` of elapsed time into the timer.
    ///
    /// ### Returns
    /// How many whole periods completed; always `0` while stopped.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(dt);
        let fired = self.accumulated.as_nanos() / self.period.as_nanos();
        if fired == 0 {
            return 0;
        }
        let fired = u32::try_from(fired).unwrap_or(u32::MAX);
        self.accumulated = self
            .period
            .checked_mul(fired)
            .and_then(|spent| self.accumulated.checked_sub(spent))
            .unwrap_or(Duration::ZERO);
        fired
    }
}

/// Handle returned by [`Scheduler::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// One timer's result from [`Scheduler::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub count: u32,
}

/// Registry of the running timers of one view.
///
/// Cancelled timers are removed and never fire again; ids are not reused.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: BTreeMap<TimerId, IntervalTimer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers and starts a timer with the given period.
    pub fn schedule(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, IntervalTimer::started(period));
        tracing::trace!(?id, period_ms = period.as_millis() as u64, "timer scheduled");
        id
    }

    /// Cancels a timer. Returns `false` if it was not active.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(&id).is_some();
        if removed {
            tracing::trace!(?id, "timer cancelled");
        }
        removed
    }

    /// Cancels every timer.
    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            tracing::debug!(count = self.timers.len(), "cancelling all timers");
        }
        self.timers.clear();
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Feeds `dt` to every timer.
    ///
    /// ### Returns
    /// The timers that completed at least one period, in id order.
    pub fn advance(&mut self, dt: Duration) -> Vec<Fired> {
        self.timers
            .iter_mut()
            .filter_map(|(&id, t)| {
                let count = t.advance(dt);
                (count > 0).then_some(Fired { id, count })
            })
            .collect()
    }

    /// Fired count for `id` in a result from [`Scheduler::advance`].
    pub fn fired_count(fired: &[Fired], id: TimerId) -> u32 {
        fired
            .iter()
            .find(|f| f.id == id)
            .map_or(0, |f| f.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn stopped_timer_never_fires() {
        let mut t = IntervalTimer::new(16 * MS);
        assert!(!t.is_running());
        assert_eq!(t.advance(Duration::from_secs(10)), 0);
    }

    #[test]
    fn timer_accumulates_partial_periods() {
        let mut t = IntervalTimer::started(16 * MS);
        assert_eq!(t.advance(10 * MS), 0);
        assert_eq!(t.advance(10 * MS), 1);
        // 4 ms carried over + 28 ms = 32 ms.
        assert_eq!(t.advance(28 * MS), 2);
        assert_eq!(t.advance(15 * MS), 0);
    }

    #[test]
    fn stop_discards_partial_period() {
        let mut t = IntervalTimer::started(16 * MS);
        t.advance(15 * MS);
        t.stop();
        t.start();
        assert_eq!(t.advance(2 * MS), 0);
    }

    #[test]
    fn huge_elapsed_time_saturates() {
        let mut t = IntervalTimer::started(16 * MS);
        assert_eq!(t.advance(Duration::MAX), u32::MAX);
        assert_eq!(t.advance(Duration::MAX), u32::MAX);

        let mut s = Scheduler::new();
        let id = s.schedule(16 * MS);
        s.advance(Duration::MAX);
        let fired = s.advance(Duration::MAX);
        assert_eq!(Scheduler::fired_count(&fired, id), u32::MAX);
    }

    #[test]
    fn zero_period_is_clamped() {
        let t = IntervalTimer::new(Duration::ZERO);
        assert_eq!(t.period(), MIN_PERIOD);
    }

    #[test]
    fn scheduler_reports_each_timer() {
        let mut s = Scheduler::new();
        let fast = s.schedule(16 * MS);
        let slow = s.schedule(100 * MS);

        let fired = s.advance(50 * MS);
        assert_eq!(Scheduler::fired_count(&fired, fast), 3);
        assert_eq!(Scheduler::fired_count(&fired, slow), 0);

        let fired = s.advance(50 * MS);
        assert_eq!(Scheduler::fired_count(&fired, slow), 1);
    }

    #[test]
    fn cancelled_timer_stays_silent() {
        let mut s = Scheduler::new();
        let id = s.schedule(16 * MS);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert_eq!(s.active_count(), 0);
        assert!(s.advance(Duration::from_secs(1)).is_empty());

        let other = s.schedule(16 * MS);
        assert_ne!(id, other);
    }

    #[test]
    fn cancel_all_empties_registry() {
        let mut s = Scheduler::new();
        s.schedule(16 * MS);
        s.schedule(33 * MS);
        s.cancel_all();
        assert_eq!(s.active_count(), 0);
        assert!(s.advance(Duration::from_secs(5)).is_empty());
    }
}
