//! Single-slot deadline timers.
//!
//! Every delayed action in the scroll core (debounced snap, wheel lock
//! release, touch arm window, jump-direction reset) is "at most one pending
//! timer of this kind". A [`TimerSlot`] holds that one deadline. Scheduling
//! replaces whatever was pending, so timers never stack.
//!
//! Slots do not run anything on their own. The owner polls them with the
//! current time from the host loop and performs the action when
//! [`TimerSlot::fire_if_due`] returns `true`. Passing time in explicitly keeps
//! every handler deterministic under test.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// At most one pending deadline, with cancel-and-replace scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<Instant>,
}

impl TimerSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the timer `delay` after `now`, cancelling any pending one.
    ///
    /// Returns `true` if a pending timer was replaced.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> bool {
        self.deadline.replace(now + delay).is_some()
    }

    /// Cancel the pending timer. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is set, due or not.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether a deadline is set and still in the future at `now`.
    ///
    /// A due-but-unpolled timer counts as expired.
    pub fn is_running(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| deadline > now)
    }

    /// Pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Clear the slot and return `true` if its deadline is at or before `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A [`TimerSlot`] shared between several owners.
///
/// Clones refer to the same slot, so two handlers scheduling the same kind of
/// timer replace each other's deadline instead of stacking two.
#[derive(Debug, Clone, Default)]
pub struct SharedTimerSlot(Rc<Cell<TimerSlot>>);

impl SharedTimerSlot {
    /// Empty shared slot.
    pub fn new() -> Self {
        Self::default()
    }

    fn update<R>(&self, f: impl FnOnce(&mut TimerSlot) -> R) -> R {
        let mut slot = self.0.get();
        let result = f(&mut slot);
        self.0.set(slot);
        result
    }

    /// See [`TimerSlot::schedule`].
    pub fn schedule(&self, now: Instant, delay: Duration) -> bool {
        self.update(|slot| slot.schedule(now, delay))
    }

    /// See [`TimerSlot::cancel`].
    pub fn cancel(&self) -> bool {
        self.update(TimerSlot::cancel)
    }

    /// See [`TimerSlot::fire_if_due`].
    pub fn fire_if_due(&self, now: Instant) -> bool {
        self.update(|slot| slot.fire_if_due(now))
    }

    /// Whether a deadline is set, due or not.
    pub fn is_pending(&self) -> bool {
        self.0.get().is_pending()
    }

    /// Pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.0.get().deadline()
    }
}

/// Earliest of several optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn shared_slot_clones_replace_each_other() {
        let t0 = Instant::now();
        let wheel = SharedTimerSlot::new();
        let touch = wheel.clone();

        wheel.schedule(t0, ms(500));
        assert!(touch.schedule(t0 + ms(450), ms(500)), "replaced the wheel deadline");
        assert_eq!(wheel.deadline(), Some(t0 + ms(950)));

        assert!(!wheel.fire_if_due(t0 + ms(500)));
        assert!(touch.fire_if_due(t0 + ms(950)));
        assert!(!wheel.is_pending());
    }

    #[test]
    fn new_slot_is_idle() {
        let slot = TimerSlot::new();
        assert!(!slot.is_pending());
        assert_eq!(slot.deadline(), None);
    }

    #[test]
    fn schedule_replaces_pending_deadline() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();

        assert!(!slot.schedule(t0, ms(500)));
        assert!(slot.schedule(t0 + ms(100), ms(500)));

        assert_eq!(slot.deadline(), Some(t0 + ms(600)));
    }

    #[test]
    fn replaced_timer_does_not_fire_at_old_deadline() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule(t0, ms(500));
        slot.schedule(t0 + ms(400), ms(500));

        assert!(!slot.fire_if_due(t0 + ms(500)));
        assert!(slot.fire_if_due(t0 + ms(900)));
    }

    #[test]
    fn fire_if_due_clears_slot_exactly_once() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule(t0, ms(10));

        assert!(!slot.fire_if_due(t0 + ms(9)));
        assert!(slot.fire_if_due(t0 + ms(10)));
        assert!(!slot.fire_if_due(t0 + ms(20)));
        assert!(!slot.is_pending());
    }

    #[test]
    fn cancel_reports_whether_pending() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        assert!(!slot.cancel());
        slot.schedule(t0, ms(10));
        assert!(slot.cancel());
        assert!(!slot.fire_if_due(t0 + ms(100)));
    }

    #[test]
    fn is_running_treats_due_deadline_as_expired() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule(t0, ms(600));

        assert!(slot.is_running(t0 + ms(599)));
        assert!(!slot.is_running(t0 + ms(600)));
        assert!(slot.is_pending());
    }

    #[test]
    fn earliest_skips_empty_slots() {
        let t0 = Instant::now();
        assert_eq!(earliest([None, Some(t0 + ms(5)), Some(t0 + ms(2))]), Some(t0 + ms(2)));
        assert_eq!(earliest([None, None]), None);
    }
}
