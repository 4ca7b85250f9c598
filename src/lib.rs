//! Section-snapping scroll synchronization (snapscroll)
//!
//! A single scroll position shared by every consumer of a sectioned page.
//! Wheel and touch gestures write to a [`store::ScrollStore`]; render loops
//! read it through a [`store::TransientReader`] without subscribing to every
//! change, and position markers ease towards it with a
//! [`follower::PositionFollower`].
//!
//! Everything is single-threaded and driven by explicit `now` timestamps:
//! handlers never sleep, the host loop polls them at their
//! `next_deadline()`.

pub mod config;
pub mod follower;
pub mod gesture;
pub mod handler;
pub mod jump;
pub mod logging;
pub mod model;
pub mod store;
pub mod timer;
pub mod trace;

#[cfg(test)]
mod tests;
