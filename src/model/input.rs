//! Input events and section identifiers.
//!
//! Events are plain values handed over by the host windowing layer. Section
//! counts go through a smart constructor so a zero-section layout can never
//! reach the store.

use super::error::SectionCountError;
use std::fmt;

/// Stable identifier of a touch point for the duration of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(u64);

impl TouchId {
    /// Wrap a host-provided touch identifier.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "touch#{}", self.0)
    }
}

/// One active touch: identifier plus vertical coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Identifier, stable across start/move/end of one contact.
    pub id: TouchId,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl TouchPoint {
    /// Create a touch point.
    pub fn new(id: u64, y: f64) -> Self {
        Self {
            id: TouchId::new(id),
            y,
        }
    }
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A contact began.
    Start,
    /// One or more contacts moved.
    Move,
    /// A contact was lifted.
    End,
}

/// A touch event.
///
/// `touches` lists the contacts that are still on the surface *after* the
/// event, so a `touchend` for the last finger carries an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// Which transition this event reports.
    pub phase: TouchPhase,
    /// Active contacts after the event.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// `touchstart` with the given active contacts.
    pub fn start(touches: Vec<TouchPoint>) -> Self {
        Self {
            phase: TouchPhase::Start,
            touches,
        }
    }

    /// `touchmove` with the given active contacts.
    pub fn moved(touches: Vec<TouchPoint>) -> Self {
        Self {
            phase: TouchPhase::Move,
            touches,
        }
    }

    /// `touchend` with the contacts remaining on the surface.
    pub fn end(touches: Vec<TouchPoint>) -> Self {
        Self {
            phase: TouchPhase::End,
            touches,
        }
    }

    /// Find the contact with the given identifier, if still active.
    pub fn find(&self, id: TouchId) -> Option<&TouchPoint> {
        self.touches.iter().find(|touch| touch.id == id)
    }
}

/// A wheel event. One notch of a typical mouse wheel is `delta_y = ±100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Vertical delta; positive scrolls towards later sections.
    pub delta_y: f64,
}

impl WheelEvent {
    /// Create a wheel event.
    pub fn new(delta_y: f64) -> Self {
        Self { delta_y }
    }
}

/// Gesture input accepted by [`ScrollHandler`](crate::handler::ScrollHandler).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse wheel or trackpad scroll.
    Wheel(WheelEvent),
    /// Touch start/move/end.
    Touch(TouchEvent),
}

impl From<WheelEvent> for InputEvent {
    fn from(event: WheelEvent) -> Self {
        InputEvent::Wheel(event)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(event)
    }
}

/// Number of sections in the hosting layout. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionCount(usize);

impl SectionCount {
    /// Smart constructor: rejects zero.
    pub fn new(count: usize) -> Result<Self, SectionCountError> {
        if count == 0 {
            return Err(SectionCountError(count));
        }
        Ok(Self(count))
    }

    /// Number of sections.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Upper scroll bound for this many sections (`count - 1`).
    pub fn max_scroll(&self) -> f64 {
        (self.0 - 1) as f64
    }
}

/// Index of a section, used by jump-to-section requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionIndex(usize);

impl SectionIndex {
    /// Wrap a section index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Scroll position at which this section is exactly aligned.
    pub fn as_position(&self) -> f64 {
        self.0 as f64
    }
}
