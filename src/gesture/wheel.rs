//! Wheel gesture handler.
//!
//! Two policies, selected by [`WheelMode`]:
//! - **Continuous**: every event scrolls `(delta_y / 100) * wheel_strength`
//!   sections immediately and restarts a snap debounce. The position settles
//!   on a whole section once the wheel has been idle for `snap_delay`.
//! - **Discrete**: an event with `|delta_y| >= wheel_threshold` steps exactly
//!   one section in its direction and locks the wheel for `wheel_cooldown`.
//!   Events while locked, and events below the threshold, are ignored.

use crate::config::{ScrollConfig, WheelMode};
use crate::model::{sign, WheelEvent};
use crate::store::ScrollStore;
use crate::timer::{earliest, SharedTimerSlot, TimerSlot};
use std::time::{Duration, Instant};
use tracing::debug;

/// Wheel delta corresponding to one notch of a typical mouse wheel.
pub const WHEEL_NOTCH: f64 = 100.0;

/// What a wheel event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelOutcome {
    /// Scrolled by a fractional delta; snap rescheduled.
    Scrolled(f64),
    /// Stepped one whole section (`+1.0` or `-1.0`) and locked.
    Stepped(f64),
    /// Ignored: cooldown from a previous step still running.
    Locked,
    /// Ignored: delta too small for a discrete step.
    BelowThreshold,
}

/// Persistent wheel handler. Owns its timers; the store is shared.
#[derive(Debug)]
pub struct WheelGestureHandler {
    store: ScrollStore,
    mode: WheelMode,
    strength: f64,
    threshold: f64,
    snap_delay: Duration,
    cooldown: Duration,
    snap: SharedTimerSlot,
    lock: TimerSlot,
}

impl WheelGestureHandler {
    /// Create a handler writing into `store`.
    pub fn new(store: ScrollStore, config: &ScrollConfig) -> Self {
        Self {
            store,
            mode: config.wheel_mode,
            strength: config.wheel_strength,
            threshold: config.wheel_threshold,
            snap_delay: config.snap_delay,
            cooldown: config.wheel_cooldown,
            snap: SharedTimerSlot::new(),
            lock: TimerSlot::new(),
        }
    }

    /// Builder: debounce snaps through `snap`, shared with other gestures.
    pub fn with_snap_timer(mut self, snap: SharedTimerSlot) -> Self {
        self.snap = snap;
        self
    }

    /// Active policy.
    pub fn mode(&self) -> WheelMode {
        self.mode
    }

    /// Handle a wheel event received at `now`.
    ///
    /// Timers due at or before `now` fire first.
    pub fn handle(&mut self, event: WheelEvent, now: Instant) -> WheelOutcome {
        self.poll(now);

        match self.mode {
            WheelMode::Continuous => {
                let delta = (event.delta_y / WHEEL_NOTCH) * self.strength;
                self.store.apply_delta(delta);
                if self.snap.schedule(now, self.snap_delay) {
                    debug!("wheel snap debounce restarted");
                }
                WheelOutcome::Scrolled(delta)
            }
            WheelMode::Discrete => {
                if self.lock.is_pending() {
                    return WheelOutcome::Locked;
                }
                let direction = sign(event.delta_y);
                if event.delta_y.abs() < self.threshold || direction == 0.0 {
                    return WheelOutcome::BelowThreshold;
                }
                self.store.apply_delta(direction);
                self.lock.schedule(now, self.cooldown);
                debug!(direction, position = self.store.position(), "wheel step, locked");
                WheelOutcome::Stepped(direction)
            }
        }
    }

    /// Fire due timers: snap (continuous) or lock release (discrete).
    pub fn poll(&mut self, now: Instant) {
        if self.snap.fire_if_due(now) {
            self.store.snap();
            debug!(position = self.store.position(), "snap fired");
        }
        if self.lock.fire_if_due(now) {
            debug!("wheel lock released");
        }
    }

    /// Whether a discrete step lock is still running at `now`.
    pub fn is_locked(&self, now: Instant) -> bool {
        self.lock.is_running(now)
    }

    /// Whether a snap is pending.
    pub fn snap_pending(&self) -> bool {
        self.snap.is_pending()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.snap.deadline(), self.lock.deadline()])
    }
}

#[cfg(test)]
#[path = "wheel_tests.rs"]
mod tests;
