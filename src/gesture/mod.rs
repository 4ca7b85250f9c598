//! Gesture handlers turning raw input into store mutations.
//!
//! Handlers are persistent objects: gesture state lives in their fields and
//! they are registered once with the host. Each handler owns its timers and
//! exposes `poll(now)` and `next_deadline()` so a host loop can drive them.

pub mod touch;
pub mod wheel;

pub use touch::{TouchGestureHandler, TouchOutcome};
pub use wheel::{WheelGestureHandler, WheelOutcome};
