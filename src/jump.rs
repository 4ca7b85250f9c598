//! Jump-to-section direction signal.
//!
//! Clicking a section marker jumps straight to that section. The position
//! marker spins while jumping, and repeated jumps in quick succession keep
//! adding to the spin in their direction. [`JumpDirectionController`] keeps
//! that accumulated sign and resets it after a period without jumps.
//!
//! The signal is ephemeral and lives outside [`ScrollState`](crate::model::ScrollState).

use crate::model::{sign, ScrollPatch, SectionIndex};
use crate::store::ScrollStore;
use crate::timer::TimerSlot;
use std::time::{Duration, Instant};
use tracing::debug;

/// Largest magnitude the accumulated jump direction can reach.
pub const MAX_JUMP_SPIN: i32 = 8;

/// Accumulates the sign of jump requests, self-resetting after inactivity.
#[derive(Debug)]
pub struct JumpDirectionController {
    direction: i32,
    reset_delay: Duration,
    reset: TimerSlot,
}

impl JumpDirectionController {
    /// Controller resetting `reset_delay` after the last jump.
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            direction: 0,
            reset_delay,
            reset: TimerSlot::new(),
        }
    }

    /// Jump to `target`: update the spin direction, restart the reset timer
    /// and write the target position into `store`.
    ///
    /// The target is a trusted write; the caller guarantees it is a valid
    /// section index for the configured section count.
    ///
    /// Returns the new direction.
    pub fn jump_to(&mut self, target: SectionIndex, store: &ScrollStore, now: Instant) -> i32 {
        self.poll(now);

        let step = sign(target.as_position() - store.position()) as i32;
        let mut direction = self.direction + step;
        // A net-zero spin would stop the marker right after an active jump
        if direction == 0 {
            direction = step;
        }
        self.direction = direction.clamp(-MAX_JUMP_SPIN, MAX_JUMP_SPIN);

        self.reset.schedule(now, self.reset_delay);
        store.set(ScrollPatch::position(target.as_position()));

        debug!(target = target.get(), direction = self.direction, "jump to section");
        self.direction
    }

    /// Fire the inactivity reset if due.
    pub fn poll(&mut self, now: Instant) {
        if self.reset.fire_if_due(now) {
            self.direction = 0;
            debug!("jump direction reset");
        }
    }

    /// Current accumulated direction; `0` means no jump spin.
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Pending reset deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.reset.deadline()
    }
}
