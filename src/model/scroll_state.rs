//! Scroll state value and partial updates.

/// Snapshot of the scroll store.
///
/// `position` counts sections: `0.0` is the first section, `1.0` the second,
/// and fractional values lie between two sections.
///
/// # Invariant
/// `min_scroll <= position <= max_scroll` after every clamping mutation of
/// [`ScrollStore`](crate::store::ScrollStore). Trusted writes through
/// [`ScrollPatch`] are not re-clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Current scroll position.
    pub position: f64,
    /// Lower bound, always `0` in practice.
    pub min_scroll: f64,
    /// Upper bound, `sections - 1`.
    pub max_scroll: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            position: 0.0,
            min_scroll: 0.0,
            max_scroll: 0.0,
        }
    }
}

impl ScrollState {
    /// Whether `position` lies within the bounds.
    pub fn is_in_bounds(&self) -> bool {
        self.min_scroll <= self.position && self.position <= self.max_scroll
    }

    /// Clamp `value` into `[min_scroll, max_scroll]`.
    ///
    /// Inverted bounds resolve to `max_scroll` instead of panicking like
    /// `f64::clamp` would.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min_scroll).min(self.max_scroll)
    }
}

/// Partial update merged into the store by [`ScrollStore::set`](crate::store::ScrollStore::set).
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPatch {
    /// New position, if any.
    pub position: Option<f64>,
    /// New lower bound, if any.
    pub min_scroll: Option<f64>,
    /// New upper bound, if any.
    pub max_scroll: Option<f64>,
}

impl ScrollPatch {
    /// Patch that only sets the position.
    pub fn position(position: f64) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Patch that only sets the upper bound.
    pub fn max_scroll(max_scroll: f64) -> Self {
        Self {
            max_scroll: Some(max_scroll),
            ..Self::default()
        }
    }

    /// Builder: also set the lower bound.
    pub fn with_min_scroll(mut self, min_scroll: f64) -> Self {
        self.min_scroll = Some(min_scroll);
        self
    }

    pub(crate) fn apply(&self, state: &mut ScrollState) {
        if let Some(position) = self.position {
            state.position = position;
        }
        if let Some(min_scroll) = self.min_scroll {
            state.min_scroll = min_scroll;
        }
        if let Some(max_scroll) = self.max_scroll {
            state.max_scroll = max_scroll;
        }
    }
}

/// Sign of `value` as `-1.0`, `0.0` or `1.0`.
///
/// Unlike `f64::signum`, zero maps to zero: a gesture with no net movement
/// must not jump a section.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_all_zero() {
        let state = ScrollState::default();
        assert_eq!(state.position, 0.0);
        assert_eq!(state.min_scroll, 0.0);
        assert_eq!(state.max_scroll, 0.0);
        assert!(state.is_in_bounds());
    }

    #[test]
    fn clamp_respects_both_bounds() {
        let state = ScrollState {
            position: 0.0,
            min_scroll: 0.0,
            max_scroll: 2.0,
        };
        assert_eq!(state.clamp(-3.0), 0.0);
        assert_eq!(state.clamp(1.25), 1.25);
        assert_eq!(state.clamp(9.0), 2.0);
    }

    #[test]
    fn clamp_with_inverted_bounds_does_not_panic() {
        let state = ScrollState {
            position: 0.0,
            min_scroll: 3.0,
            max_scroll: 1.0,
        };
        assert_eq!(state.clamp(2.0), 1.0);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut state = ScrollState {
            position: 1.5,
            min_scroll: 0.0,
            max_scroll: 4.0,
        };
        ScrollPatch::max_scroll(2.0).apply(&mut state);
        assert_eq!(state.position, 1.5);
        assert_eq!(state.max_scroll, 2.0);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(42.0), 1.0);
        assert_eq!(sign(-0.001), -1.0);
    }
}
