//! Domain model: scroll state, gesture input and error types.

pub mod error;
pub mod input;
pub mod scroll_state;

pub use error::{AppError, SectionCountError, TraceError};
pub use input::{
    InputEvent, SectionCount, SectionIndex, TouchEvent, TouchId, TouchPhase, TouchPoint,
    WheelEvent,
};
pub use scroll_state::{sign, ScrollPatch, ScrollState};
