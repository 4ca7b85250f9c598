//! Touch gesture handler.
//!
//! Tracks a single contact from `touchstart` to the `touchend` that leaves no
//! contacts on the surface. The first contact wins: touches that start while
//! another is tracked, and moves of any other contact, are ignored.
//!
//! Two policies, selected by [`TouchMode`]:
//! - **Continuous**: each move scrolls
//!   `(previous_y - y) / viewport_height * touch_strength` sections. Release
//!   schedules a snap after `snap_delay`; a new gesture cancels it.
//! - **Swipe**: moves only accumulate. Releasing while the gesture is still
//!   armed steps one section in the accumulated direction; releasing after
//!   the window expired (a slow drag) changes nothing.
//!
//! Every gesture is armed for `touch_arm_window` after `touchstart`; only
//! the swipe policy acts on it.

use crate::config::{ScrollConfig, TouchMode};
use crate::model::{sign, TouchEvent, TouchId, TouchPhase};
use crate::store::ScrollStore;
use crate::timer::{earliest, SharedTimerSlot, TimerSlot};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// What a touch event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchOutcome {
    /// A new gesture started tracking this contact.
    Started(TouchId),
    /// The tracked contact moved by this many pixels (positive = upwards).
    Moved(f64),
    /// Continuous release: snap scheduled.
    SnapScheduled,
    /// Swipe release inside the window: stepped by `+1.0` or `-1.0`.
    Swiped(f64),
    /// Swipe release after the window, or with no net movement.
    Dragged,
    /// Event did not concern the tracked gesture.
    Ignored,
}

/// Per-gesture tracking state.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackedTouch {
    id: TouchId,
    previous_y: f64,
    accumulated: f64,
}

/// Persistent touch handler. Owns its gesture state; the store is shared.
#[derive(Debug)]
pub struct TouchGestureHandler {
    store: ScrollStore,
    mode: TouchMode,
    strength: f64,
    viewport_height: f64,
    snap_delay: Duration,
    arm_window: Duration,
    tracked: Option<TrackedTouch>,
    snap: SharedTimerSlot,
    arm: TimerSlot,
}

impl TouchGestureHandler {
    /// Create a handler writing into `store`.
    ///
    /// The viewport height starts at `0`, which turns continuous moves into
    /// no-ops until [`set_viewport_height`](Self::set_viewport_height) is called.
    pub fn new(store: ScrollStore, config: &ScrollConfig) -> Self {
        Self {
            store,
            mode: config.touch_mode,
            strength: config.touch_strength,
            viewport_height: 0.0,
            snap_delay: config.snap_delay,
            arm_window: config.touch_arm_window,
            tracked: None,
            snap: SharedTimerSlot::new(),
            arm: TimerSlot::new(),
        }
    }

    /// Builder: debounce snaps through `snap`, shared with other gestures.
    pub fn with_snap_timer(mut self, snap: SharedTimerSlot) -> Self {
        self.snap = snap;
        self
    }

    /// Active policy.
    pub fn mode(&self) -> TouchMode {
        self.mode
    }

    /// Height of the viewport in the same units as touch coordinates.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Handle a touch event received at `now`.
    ///
    /// Timers due at or before `now` fire first.
    pub fn handle(&mut self, event: &TouchEvent, now: Instant) -> TouchOutcome {
        self.poll(now);

        match event.phase {
            TouchPhase::Start => self.start(event, now),
            TouchPhase::Move => self.moved(event),
            TouchPhase::End => self.end(event, now),
        }
    }

    fn start(&mut self, event: &TouchEvent, now: Instant) -> TouchOutcome {
        // Only the first finger down begins a gesture
        let [touch] = event.touches.as_slice() else {
            return TouchOutcome::Ignored;
        };

        self.tracked = Some(TrackedTouch {
            id: touch.id,
            previous_y: touch.y,
            accumulated: 0.0,
        });

        self.arm.schedule(now, self.arm_window);
        if self.mode == TouchMode::Continuous && self.snap.cancel() {
            debug!("pending snap cancelled by touch");
        }

        trace!(id = %touch.id, y = touch.y, "touch gesture started");
        TouchOutcome::Started(touch.id)
    }

    fn moved(&mut self, event: &TouchEvent) -> TouchOutcome {
        let Some(tracked) = self.tracked.as_mut() else {
            return TouchOutcome::Ignored;
        };
        let Some(touch) = event.find(tracked.id) else {
            return TouchOutcome::Ignored;
        };

        let delta = tracked.previous_y - touch.y;
        tracked.previous_y = touch.y;

        match self.mode {
            TouchMode::Continuous => {
                if self.viewport_height > 0.0 {
                    self.store
                        .apply_delta(delta / self.viewport_height * self.strength);
                }
            }
            TouchMode::Swipe => {
                tracked.accumulated += delta;
            }
        }

        TouchOutcome::Moved(delta)
    }

    fn end(&mut self, event: &TouchEvent, now: Instant) -> TouchOutcome {
        if !event.touches.is_empty() {
            return TouchOutcome::Ignored;
        }
        let Some(tracked) = self.tracked.take() else {
            return TouchOutcome::Ignored;
        };

        match self.mode {
            TouchMode::Continuous => {
                self.arm.cancel();
                self.snap.schedule(now, self.snap_delay);
                debug!("touch released, snap scheduled");
                TouchOutcome::SnapScheduled
            }
            TouchMode::Swipe => {
                let armed = self.arm.cancel();
                let direction = sign(tracked.accumulated);
                if armed && direction != 0.0 {
                    self.store.apply_delta(direction);
                    debug!(direction, position = self.store.position(), "swipe");
                    TouchOutcome::Swiped(direction)
                } else {
                    debug!(armed, accumulated = tracked.accumulated, "drag released without step");
                    TouchOutcome::Dragged
                }
            }
        }
    }

    /// Fire due timers: snap (continuous) or disarm (swipe).
    ///
    /// Disarming does not end the gesture; it only stops the release from
    /// counting as a swipe.
    pub fn poll(&mut self, now: Instant) {
        if self.snap.fire_if_due(now) {
            self.store.snap();
            debug!(position = self.store.position(), "snap fired");
        }
        if self.arm.fire_if_due(now) {
            trace!("touch gesture disarmed");
        }
    }

    /// Whether a gesture is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.tracked.is_some()
    }

    /// Whether the current gesture would still count as a swipe at `now`.
    pub fn is_armed(&self, now: Instant) -> bool {
        self.tracked.is_some() && self.arm.is_running(now)
    }

    /// Whether a snap is pending.
    pub fn snap_pending(&self) -> bool {
        self.snap.is_pending()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.snap.deadline(), self.arm.deadline()])
    }
}

#[cfg(test)]
#[path = "touch_tests.rs"]
mod tests;
