//! Replay of parsed traces against the real handlers.

use super::{TraceEvent, TraceRecord};
use crate::config::ScrollConfig;
use crate::follower::PositionFollower;
use crate::handler::ScrollHandler;
use crate::jump::JumpDirectionController;
use crate::model::{AppError, SectionCount};
use crate::store::{ScrollStore, TransientReader};
use crate::timer::earliest;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// State observed at one render frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSample {
    /// Trace time of the frame.
    pub at_ms: u64,
    /// Store position.
    pub position: f64,
    /// Position seen through the transient reader.
    pub transient: f64,
    /// Smoothed marker position after this frame.
    pub followed: f64,
    /// Jump spin direction.
    pub jump_direction: i32,
}

impl fmt::Display for FrameSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>8} {:>9.4} {:>9.4} {:>9.4} {:>4}",
            self.at_ms, self.position, self.transient, self.followed, self.jump_direction
        )
    }
}

/// A running replay: one store with every consumer attached.
///
/// Trace time is mapped onto a fixed base [`Instant`], so timers fire exactly
/// at their recorded deadlines regardless of how fast the replay runs.
pub struct Replay {
    base: Instant,
    now_ms: u64,
    handler: ScrollHandler,
    jump: JumpDirectionController,
    reader: TransientReader,
    follower: PositionFollower,
    samples: Vec<FrameSample>,
}

impl Replay {
    /// Fresh replay with an unconfigured store.
    pub fn new(config: &ScrollConfig) -> Self {
        let store = ScrollStore::new();
        let reader = TransientReader::new(&store);
        Self {
            base: Instant::now(),
            now_ms: 0,
            handler: ScrollHandler::new(store.clone(), config),
            jump: JumpDirectionController::new(config.jump_reset_delay),
            follower: PositionFollower::new(store.position())
                .with_smoothing(config.follow_smoothing),
            reader,
            samples: Vec::new(),
        }
    }

    fn instant(&self, at_ms: u64) -> Instant {
        self.base + Duration::from_millis(at_ms)
    }

    fn advance_to(&mut self, at_ms: u64) {
        self.now_ms = self.now_ms.max(at_ms);
        let now = self.instant(self.now_ms);
        self.handler.poll(now);
        self.jump.poll(now);
    }

    /// Apply one record: fire due timers, then handle the event.
    pub fn apply(&mut self, record: &TraceRecord) -> Result<(), AppError> {
        self.advance_to(record.at_ms);
        let now = self.instant(self.now_ms);

        match &record.event {
            TraceEvent::Sections(count) => {
                let sections = SectionCount::new(*count)?;
                self.handler.configure_sections(sections);
            }
            TraceEvent::Viewport(height) => self.handler.set_viewport_height(*height),
            TraceEvent::Input(event) => {
                let outcome = self.handler.handle(event, now);
                debug!(at_ms = record.at_ms, ?outcome, "input replayed");
            }
            TraceEvent::Jump(index) => {
                let max_scroll = self.handler.store().get().max_scroll;
                if index.as_position() > max_scroll {
                    warn!(index = index.get(), max_scroll, "jump past last section skipped");
                } else {
                    self.jump.jump_to(*index, self.handler.store(), now);
                }
            }
            TraceEvent::Frame => self.sample(),
        }
        Ok(())
    }

    fn sample(&mut self) {
        let transient = self.reader.get();
        let sample = FrameSample {
            at_ms: self.now_ms,
            position: self.handler.store().position(),
            transient,
            followed: self.follower.step(transient),
            jump_direction: self.jump.direction(),
        };
        self.samples.push(sample);
    }

    fn next_deadline(&self) -> Option<Instant> {
        earliest([self.handler.next_deadline(), self.jump.next_deadline()])
    }

    /// Fire every pending timer in deadline order, then take a last sample.
    pub fn finish(mut self) -> Vec<FrameSample> {
        while let Some(deadline) = self.next_deadline() {
            let elapsed = deadline.saturating_duration_since(self.base).as_millis();
            self.advance_to(u64::try_from(elapsed).unwrap_or(u64::MAX));
        }
        self.sample();
        self.samples
    }

    /// Samples taken so far.
    pub fn samples(&self) -> &[FrameSample] {
        &self.samples
    }
}

impl fmt::Debug for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replay")
            .field("now_ms", &self.now_ms)
            .field("position", &self.reader.get())
            .field("samples", &self.samples.len())
            .finish()
    }
}

/// Replay `records` from a fresh store and return every frame sample plus a
/// final one taken after all timers have drained.
pub fn replay(records: &[TraceRecord], config: &ScrollConfig) -> Result<Vec<FrameSample>, AppError> {
    let mut replay = Replay::new(config);
    for record in records {
        replay.apply(record)?;
    }
    Ok(replay.finish())
}
