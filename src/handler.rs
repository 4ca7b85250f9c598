//! Composed input handler registered once with the host.
//!
//! [`ScrollHandler`] owns one wheel and one touch handler writing into the
//! same store and routes [`InputEvent`]s to them. Both gestures debounce
//! through one shared snap timer: the snap waits for a quiet period after the
//! last wheel event or touch release, whichever came later.

use crate::config::ScrollConfig;
use crate::gesture::{TouchGestureHandler, TouchOutcome, WheelGestureHandler, WheelOutcome};
use crate::model::{InputEvent, SectionCount};
use crate::store::ScrollStore;
use crate::timer::{earliest, SharedTimerSlot};
use std::time::Instant;
use tracing::debug;

/// Result of routing one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleOutcome {
    /// The wheel handler consumed the event.
    Wheel(WheelOutcome),
    /// The touch handler consumed the event.
    Touch(TouchOutcome),
}

/// Wheel plus touch handling over a shared [`ScrollStore`].
///
/// Dropping the handler drops its timers; nothing else needs tearing down.
#[derive(Debug)]
pub struct ScrollHandler {
    store: ScrollStore,
    wheel: WheelGestureHandler,
    touch: TouchGestureHandler,
}

impl ScrollHandler {
    /// Create handlers for `store` using the policies selected in `config`.
    pub fn new(store: ScrollStore, config: &ScrollConfig) -> Self {
        debug!(
            wheel_mode = %config.wheel_mode,
            touch_mode = %config.touch_mode,
            "scroll handler registered"
        );
        let snap = SharedTimerSlot::new();
        Self {
            wheel: WheelGestureHandler::new(store.clone(), config).with_snap_timer(snap.clone()),
            touch: TouchGestureHandler::new(store.clone(), config).with_snap_timer(snap),
            store,
        }
    }

    /// The store this handler writes into.
    pub fn store(&self) -> &ScrollStore {
        &self.store
    }

    /// Update the scroll range after the layout reported its section count.
    pub fn configure_sections(&self, sections: SectionCount) {
        self.store.set_section_count(sections);
    }

    /// Update the viewport height used to scale touch movement.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.touch.set_viewport_height(height);
    }

    /// Route an input event received at `now`.
    ///
    /// All due timers fire before the event is handled, so event order and
    /// timer order agree.
    pub fn handle(&mut self, event: &InputEvent, now: Instant) -> HandleOutcome {
        self.poll(now);
        match event {
            InputEvent::Wheel(wheel) => HandleOutcome::Wheel(self.wheel.handle(*wheel, now)),
            InputEvent::Touch(touch) => HandleOutcome::Touch(self.touch.handle(touch, now)),
        }
    }

    /// Fire every gesture timer due at `now`.
    pub fn poll(&mut self, now: Instant) {
        self.wheel.poll(now);
        self.touch.poll(now);
    }

    /// Earliest pending deadline across both gestures.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.wheel.next_deadline(), self.touch.next_deadline()])
    }

    /// Wheel half, for inspecting lock and snap state.
    pub fn wheel(&self) -> &WheelGestureHandler {
        &self.wheel
    }

    /// Touch half, for inspecting tracking state.
    pub fn touch(&self) -> &TouchGestureHandler {
        &self.touch
    }
}
