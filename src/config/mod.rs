//! Configuration module.
//!
//! [`ScrollConfig`] is the runtime configuration consumed by the gesture
//! handlers. The [`loader`] submodule builds it from defaults, a TOML file,
//! environment variables and CLI flags.

pub mod loader;

pub use loader::{ConfigError, ConfigFile, ResolvedConfig};

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Wheel gesture policy.
///
/// The two policies have different semantics and are never blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WheelMode {
    /// Accumulate fractional deltas, snap after the wheel goes idle.
    #[default]
    Continuous,
    /// One whole section per notch above the threshold, then a cooldown.
    Discrete,
}

/// Touch gesture policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TouchMode {
    /// Follow the finger, snap after release.
    #[default]
    Continuous,
    /// Quick flicks jump one section; slow drags do nothing.
    Swipe,
}

impl fmt::Display for WheelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelMode::Continuous => write!(f, "continuous"),
            WheelMode::Discrete => write!(f, "discrete"),
        }
    }
}

impl fmt::Display for TouchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TouchMode::Continuous => write!(f, "continuous"),
            TouchMode::Swipe => write!(f, "swipe"),
        }
    }
}

/// Default fraction of a section scrolled per wheel notch.
pub const DEFAULT_WHEEL_STRENGTH: f64 = 1.0 / 14.0;
/// Default touch multiplier: `1 / 3.5` of the viewport scrolls one section.
pub const DEFAULT_TOUCH_STRENGTH: f64 = 3.5;
/// Default idle time before snapping to the nearest section.
pub const DEFAULT_SNAP_DELAY_MS: u64 = 500;
/// Default minimum `|delta_y|` for a discrete wheel step.
pub const DEFAULT_WHEEL_THRESHOLD: f64 = 100.0;
/// Default lock period after a discrete wheel step.
pub const DEFAULT_WHEEL_COOLDOWN_MS: u64 = 600;
/// Default window after touchstart during which a release counts as a swipe.
pub const DEFAULT_TOUCH_ARM_WINDOW_MS: u64 = 600;
/// Default inactivity period before the jump spin resets.
pub const DEFAULT_JUMP_RESET_DELAY_MS: u64 = 2500;
/// Default per-frame interpolation factor of the position follower.
pub const DEFAULT_FOLLOW_SMOOTHING: f64 = 0.07;

/// Runtime scroll configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Wheel policy.
    pub wheel_mode: WheelMode,
    /// Touch policy.
    pub touch_mode: TouchMode,
    /// Sections per 100 units of wheel delta (continuous wheel).
    pub wheel_strength: f64,
    /// Sections per viewport height of finger travel (continuous touch).
    pub touch_strength: f64,
    /// Debounce before snapping (continuous wheel and touch).
    pub snap_delay: Duration,
    /// Minimum `|delta_y|` for a step (discrete wheel).
    pub wheel_threshold: f64,
    /// Lock after a step (discrete wheel).
    pub wheel_cooldown: Duration,
    /// Swipe window after touchstart (swipe touch).
    pub touch_arm_window: Duration,
    /// Inactivity before the jump direction resets.
    pub jump_reset_delay: Duration,
    /// Per-frame interpolation factor for [`PositionFollower`](crate::follower::PositionFollower).
    pub follow_smoothing: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            wheel_mode: WheelMode::default(),
            touch_mode: TouchMode::default(),
            wheel_strength: DEFAULT_WHEEL_STRENGTH,
            touch_strength: DEFAULT_TOUCH_STRENGTH,
            snap_delay: Duration::from_millis(DEFAULT_SNAP_DELAY_MS),
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            wheel_cooldown: Duration::from_millis(DEFAULT_WHEEL_COOLDOWN_MS),
            touch_arm_window: Duration::from_millis(DEFAULT_TOUCH_ARM_WINDOW_MS),
            jump_reset_delay: Duration::from_millis(DEFAULT_JUMP_RESET_DELAY_MS),
            follow_smoothing: DEFAULT_FOLLOW_SMOOTHING,
        }
    }
}

impl ScrollConfig {
    /// Builder: select the wheel policy.
    pub fn with_wheel_mode(mut self, mode: WheelMode) -> Self {
        self.wheel_mode = mode;
        self
    }

    /// Builder: select the touch policy.
    pub fn with_touch_mode(mut self, mode: TouchMode) -> Self {
        self.touch_mode = mode;
        self
    }

    /// Builder: set the wheel strength.
    pub fn with_wheel_strength(mut self, strength: f64) -> Self {
        self.wheel_strength = strength;
        self
    }

    /// Builder: set the touch strength.
    pub fn with_touch_strength(mut self, strength: f64) -> Self {
        self.touch_strength = strength;
        self
    }
}
