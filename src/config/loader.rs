//! Configuration file loading with precedence handling.

use super::{
    ScrollConfig, TouchMode, WheelMode, DEFAULT_FOLLOW_SMOOTHING, DEFAULT_JUMP_RESET_DELAY_MS,
    DEFAULT_SNAP_DELAY_MS, DEFAULT_TOUCH_ARM_WINDOW_MS, DEFAULT_TOUCH_STRENGTH,
    DEFAULT_WHEEL_COOLDOWN_MS, DEFAULT_WHEEL_STRENGTH, DEFAULT_WHEEL_THRESHOLD,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SNAPSCROLL_CONFIG";
/// Environment variable overriding the wheel policy.
pub const WHEEL_MODE_ENV_VAR: &str = "SNAPSCROLL_WHEEL_MODE";
/// Environment variable overriding the touch policy.
pub const TOUCH_MODE_ENV_VAR: &str = "SNAPSCROLL_TOUCH_MODE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is outside its meaningful range.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/snapscroll/config.toml`.
///
/// ```toml
/// wheel_mode = "discrete"
/// wheel_threshold = 80.0
/// touch_mode = "swipe"
/// touch_arm_window_ms = 450
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Wheel policy.
    #[serde(default)]
    pub wheel_mode: Option<WheelMode>,

    /// Touch policy.
    #[serde(default)]
    pub touch_mode: Option<TouchMode>,

    /// Sections per 100 units of wheel delta.
    #[serde(default)]
    pub wheel_strength: Option<f64>,

    /// Sections per viewport height of finger travel.
    #[serde(default)]
    pub touch_strength: Option<f64>,

    /// Snap debounce in milliseconds.
    #[serde(default)]
    pub snap_delay_ms: Option<u64>,

    /// Minimum wheel delta for a discrete step.
    #[serde(default)]
    pub wheel_threshold: Option<f64>,

    /// Discrete wheel lock in milliseconds.
    #[serde(default)]
    pub wheel_cooldown_ms: Option<u64>,

    /// Swipe window in milliseconds.
    #[serde(default)]
    pub touch_arm_window_ms: Option<u64>,

    /// Jump spin reset delay in milliseconds.
    #[serde(default)]
    pub jump_reset_delay_ms: Option<u64>,

    /// Position follower interpolation factor.
    #[serde(default)]
    pub follow_smoothing: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Wheel policy.
    pub wheel_mode: WheelMode,
    /// Touch policy.
    pub touch_mode: TouchMode,
    /// Wheel strength.
    pub wheel_strength: f64,
    /// Touch strength.
    pub touch_strength: f64,
    /// Snap debounce.
    pub snap_delay_ms: u64,
    /// Discrete wheel threshold.
    pub wheel_threshold: f64,
    /// Discrete wheel lock.
    pub wheel_cooldown_ms: u64,
    /// Swipe window.
    pub touch_arm_window_ms: u64,
    /// Jump spin reset delay.
    pub jump_reset_delay_ms: u64,
    /// Follower interpolation factor.
    pub follow_smoothing: f64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            wheel_mode: WheelMode::default(),
            touch_mode: TouchMode::default(),
            wheel_strength: DEFAULT_WHEEL_STRENGTH,
            touch_strength: DEFAULT_TOUCH_STRENGTH,
            snap_delay_ms: DEFAULT_SNAP_DELAY_MS,
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            wheel_cooldown_ms: DEFAULT_WHEEL_COOLDOWN_MS,
            touch_arm_window_ms: DEFAULT_TOUCH_ARM_WINDOW_MS,
            jump_reset_delay_ms: DEFAULT_JUMP_RESET_DELAY_MS,
            follow_smoothing: DEFAULT_FOLLOW_SMOOTHING,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject values that would make the gesture handlers misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for non-finite or non-positive
    /// strengths, a negative threshold, or a smoothing factor outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("expected a positive number, got {}", value),
                })
            }
        }

        positive("wheel_strength", self.wheel_strength)?;
        positive("touch_strength", self.touch_strength)?;

        if !(self.wheel_threshold.is_finite() && self.wheel_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "wheel_threshold",
                reason: format!("expected a non-negative number, got {}", self.wheel_threshold),
            });
        }

        if !(self.follow_smoothing > 0.0 && self.follow_smoothing <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "follow_smoothing",
                reason: format!("expected a value in (0, 1], got {}", self.follow_smoothing),
            });
        }

        Ok(())
    }

    /// Runtime configuration for the gesture handlers.
    pub fn scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            wheel_mode: self.wheel_mode,
            touch_mode: self.touch_mode,
            wheel_strength: self.wheel_strength,
            touch_strength: self.touch_strength,
            snap_delay: Duration::from_millis(self.snap_delay_ms),
            wheel_threshold: self.wheel_threshold,
            wheel_cooldown: Duration::from_millis(self.wheel_cooldown_ms),
            touch_arm_window: Duration::from_millis(self.touch_arm_window_ms),
            jump_reset_delay: Duration::from_millis(self.jump_reset_delay_ms),
            follow_smoothing: self.follow_smoothing,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/snapscroll/snapscroll.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("snapscroll").join("snapscroll.log")
    } else {
        PathBuf::from("snapscroll.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/snapscroll/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapscroll").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SNAPSCROLL_CONFIG` environment variable
/// 3. Default path `~/.config/snapscroll/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        wheel_mode: config.wheel_mode.unwrap_or(defaults.wheel_mode),
        touch_mode: config.touch_mode.unwrap_or(defaults.touch_mode),
        wheel_strength: config.wheel_strength.unwrap_or(defaults.wheel_strength),
        touch_strength: config.touch_strength.unwrap_or(defaults.touch_strength),
        snap_delay_ms: config.snap_delay_ms.unwrap_or(defaults.snap_delay_ms),
        wheel_threshold: config.wheel_threshold.unwrap_or(defaults.wheel_threshold),
        wheel_cooldown_ms: config
            .wheel_cooldown_ms
            .unwrap_or(defaults.wheel_cooldown_ms),
        touch_arm_window_ms: config
            .touch_arm_window_ms
            .unwrap_or(defaults.touch_arm_window_ms),
        jump_reset_delay_ms: config
            .jump_reset_delay_ms
            .unwrap_or(defaults.jump_reset_delay_ms),
        follow_smoothing: config.follow_smoothing.unwrap_or(defaults.follow_smoothing),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SNAPSCROLL_WHEEL_MODE`: `continuous` or `discrete`
/// - `SNAPSCROLL_TOUCH_MODE`: `continuous` or `swipe`
///
/// Values are matched case-insensitively.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming the variable when a value is
/// set but not a known mode, the same as a bad value in the file or on the CLI.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(mode) = env_mode::<WheelMode>(WHEEL_MODE_ENV_VAR)? {
        config.wheel_mode = mode;
    }

    if let Some(mode) = env_mode::<TouchMode>(TOUCH_MODE_ENV_VAR)? {
        config.touch_mode = mode;
    }

    Ok(config)
}

/// Read a mode from `var`; `Ok(None)` when the variable is unset.
fn env_mode<M: clap::ValueEnum>(var: &'static str) -> Result<Option<M>, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    M::from_str(&raw, true)
        .map(Some)
        .map_err(|reason| ConfigError::InvalidValue { field: var, reason })
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    wheel_mode_override: Option<WheelMode>,
    touch_mode_override: Option<TouchMode>,
) -> ResolvedConfig {
    if let Some(mode) = wheel_mode_override {
        config.wheel_mode = mode;
    }

    if let Some(mode) = touch_mode_override {
        config.touch_mode = mode;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
