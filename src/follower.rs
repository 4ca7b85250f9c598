//! Per-frame smoothing for position markers.
//!
//! A marker reads the transient position once per frame and eases towards it
//! instead of jumping, so discrete section steps still animate.

use std::f64::consts::PI;

/// Linear interpolation from `start` to `end` at `progress` in `[0, 1]`.
pub fn lerp(start: f64, end: f64, progress: f64) -> f64 {
    start * (1.0 - progress) + end * progress
}

/// Damped follower: each [`step`](Self::step) moves a fixed fraction of the
/// remaining distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFollower {
    current: f64,
    smoothing: f64,
}

impl PositionFollower {
    /// Follower starting at `initial` with the default smoothing.
    pub fn new(initial: f64) -> Self {
        Self {
            current: initial,
            smoothing: crate::config::DEFAULT_FOLLOW_SMOOTHING,
        }
    }

    /// Builder: fraction of the remaining distance covered per step, clamped
    /// into `[0, 1]`.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    /// Advance one frame towards `target`; returns the new value.
    pub fn step(&mut self, target: f64) -> f64 {
        self.current = lerp(self.current, target, self.smoothing);
        self.current
    }

    /// Current smoothed value.
    pub fn current(&self) -> f64 {
        self.current
    }
}

/// Rotation of the position marker in radians.
///
/// While a jump spin is active the marker turns half a revolution per unit of
/// jump direction; otherwise it rolls with the scroll position.
pub fn marker_rotation(position: f64, jump_direction: i32) -> f64 {
    if jump_direction != 0 {
        f64::from(jump_direction) * PI
    } else {
        position * PI
    }
}
