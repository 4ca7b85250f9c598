//! Non-render-triggering read path for high-frequency consumers.
//!
//! A [`TransientReader`] mirrors the store's position into a single cell via a
//! store subscription. Per-frame consumers read the cell instead of
//! subscribing themselves, so the store's notification machinery runs once
//! per write rather than once per write per frame consumer.
//!
//! The cell is a cache invalidated by the write path. With single-threaded
//! run-to-completion scheduling, any write that completes before a frame
//! callback starts is visible to that callback's read; a consumer sampling
//! once per frame lags the store by at most one frame.

use super::{ScrollStore, Subscription};
use std::cell::Cell;
use std::rc::Rc;

/// Cell tracking the store's position for the reader's lifetime.
#[derive(Debug)]
pub struct TransientReader {
    cell: Rc<Cell<f64>>,
    _subscription: Subscription,
}

impl TransientReader {
    /// Seed the cell with the current position and subscribe to changes.
    pub fn new(store: &ScrollStore) -> Self {
        let cell = Rc::new(Cell::new(store.position()));
        let sink = Rc::clone(&cell);
        let subscription = store.subscribe(|state| state.position, move |position, _| {
            sink.set(*position)
        });
        Self {
            cell,
            _subscription: subscription,
        }
    }

    /// Latest published position. A plain memory read.
    pub fn get(&self) -> f64 {
        self.cell.get()
    }

    /// Shared handle to the cell, for frame callbacks that outlive a borrow
    /// of the reader. The handle stops updating once the reader is dropped.
    pub fn cell(&self) -> Rc<Cell<f64>> {
        Rc::clone(&self.cell)
    }
}
