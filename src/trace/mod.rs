//! JSONL input traces.
//!
//! A trace is a recorded session: one JSON object per line, each stamped with
//! `at_ms` (milliseconds since the start of the session) and tagged by
//! `kind`. Replaying a trace drives the real handlers with the recorded
//! timing, which makes gesture behavior reproducible outside a browser.
//!
//! ```text
//! {"at_ms":0,"kind":"sections","count":3}
//! {"at_ms":0,"kind":"viewport","height":1080}
//! {"at_ms":10,"kind":"wheel","delta_y":100}
//! {"at_ms":20,"kind":"touch","phase":"start","touches":[{"id":1,"y":100}]}
//! {"at_ms":30,"kind":"jump","index":2}
//! {"at_ms":40,"kind":"frame"}
//! ```

pub mod replay;

pub use replay::{replay, FrameSample, Replay};

use crate::model::{
    InputEvent, SectionIndex, TouchEvent, TouchPhase, TouchPoint, TraceError, WheelEvent,
};
use serde::Deserialize;
use std::path::Path;

/// One trace line after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    /// Milliseconds since the start of the trace.
    pub at_ms: u64,
    /// What happened.
    pub event: TraceEvent,
}

/// Event carried by a trace record.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// The layout reported its number of sections. Validated at replay time.
    Sections(usize),
    /// The viewport was resized.
    Viewport(f64),
    /// Wheel or touch input.
    Input(InputEvent),
    /// A section marker was clicked.
    Jump(SectionIndex),
    /// A render frame: sample the scroll state.
    Frame,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    at_ms: u64,
    #[serde(flatten)]
    event: RawEvent,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawEvent {
    Sections {
        count: usize,
    },
    Viewport {
        height: f64,
    },
    Wheel {
        delta_y: f64,
    },
    Touch {
        phase: RawTouchPhase,
        #[serde(default)]
        touches: Vec<RawTouchPoint>,
    },
    Jump {
        index: usize,
    },
    Frame,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawTouchPhase {
    Start,
    Move,
    End,
}

#[derive(Debug, Deserialize)]
struct RawTouchPoint {
    id: u64,
    y: f64,
}

impl From<RawTouchPhase> for TouchPhase {
    fn from(phase: RawTouchPhase) -> Self {
        match phase {
            RawTouchPhase::Start => TouchPhase::Start,
            RawTouchPhase::Move => TouchPhase::Move,
            RawTouchPhase::End => TouchPhase::End,
        }
    }
}

impl From<RawEvent> for TraceEvent {
    fn from(raw: RawEvent) -> Self {
        match raw {
            RawEvent::Sections { count } => TraceEvent::Sections(count),
            RawEvent::Viewport { height } => TraceEvent::Viewport(height),
            RawEvent::Wheel { delta_y } => TraceEvent::Input(WheelEvent::new(delta_y).into()),
            RawEvent::Touch { phase, touches } => TraceEvent::Input(
                TouchEvent {
                    phase: phase.into(),
                    touches: touches
                        .into_iter()
                        .map(|touch| TouchPoint::new(touch.id, touch.y))
                        .collect(),
                }
                .into(),
            ),
            RawEvent::Jump { index } => TraceEvent::Jump(SectionIndex::new(index)),
            RawEvent::Frame => TraceEvent::Frame,
        }
    }
}

/// Parse a single trace line.
///
/// `line` is the 1-based line number used in errors.
pub fn parse_record(input: &str, line: usize) -> Result<TraceRecord, TraceError> {
    let raw: RawRecord = serde_json::from_str(input).map_err(|e| TraceError::Parse {
        line,
        reason: e.to_string(),
    })?;
    Ok(TraceRecord {
        at_ms: raw.at_ms,
        event: raw.event.into(),
    })
}

/// Parse a whole trace.
///
/// Blank lines are skipped. Timestamps must never decrease.
pub fn parse_trace(input: &str) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    let mut previous_ms = 0;

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        if text.trim().is_empty() {
            continue;
        }

        let record = parse_record(text, line)?;
        if record.at_ms < previous_ms {
            return Err(TraceError::OutOfOrder {
                line,
                at_ms: record.at_ms,
                previous_ms,
            });
        }
        previous_ms = record.at_ms;
        records.push(record);
    }

    Ok(records)
}

/// Read and parse a trace file.
pub fn load_trace(path: &Path) -> Result<Vec<TraceRecord>, TraceError> {
    let input = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_trace(&input)?;
    tracing::info!(path = %path.display(), records = records.len(), "trace loaded");
    Ok(records)
}
