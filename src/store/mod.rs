//! Canonical scroll state holder.
//!
//! [`ScrollStore`] is an explicitly constructed, cheaply cloneable handle to
//! one shared [`ScrollState`]. All writes go through three mutators:
//! - [`ScrollStore::apply_delta`] and [`ScrollStore::snap`] clamp into bounds
//! - [`ScrollStore::set`] merges a trusted patch without clamping
//!
//! Observers register with [`ScrollStore::subscribe`] and are notified after
//! every write, filtered through a selector so they only hear about changes to
//! the value they care about.
//!
//! The store is `Rc`-based and therefore `!Send`: it lives on the thread that
//! runs the host event loop, and no locking is needed.

pub mod transient;

pub use transient::TransientReader;

use crate::model::{ScrollPatch, ScrollState, SectionCount};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

type Listener = Rc<RefCell<dyn FnMut(&ScrollState)>>;

struct Subscriber {
    id: u64,
    listener: Listener,
    /// Set when a write landed while the listener was running.
    missed: Rc<Cell<bool>>,
}

struct StoreInner {
    state: Cell<ScrollState>,
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<u64>,
}

/// Shared handle to the scroll state.
///
/// Clones refer to the same state and subscriber list.
#[derive(Clone)]
pub struct ScrollStore {
    inner: Rc<StoreInner>,
}

impl Default for ScrollStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScrollStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollStore")
            .field("state", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ScrollStore {
    /// Store at position 0 with bounds `[0, 0]`.
    pub fn new() -> Self {
        Self::with_state(ScrollState::default())
    }

    /// Store starting from the given state.
    pub fn with_state(state: ScrollState) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: Cell::new(state),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Current state snapshot.
    pub fn get(&self) -> ScrollState {
        self.inner.state.get()
    }

    /// Current scroll position.
    pub fn position(&self) -> f64 {
        self.get().position
    }

    /// Merge `patch` into the state without clamping.
    ///
    /// Reserved for trusted writes: configuring bounds, or jumping to a
    /// section index the caller already knows is valid.
    pub fn set(&self, patch: ScrollPatch) {
        let mut state = self.get();
        patch.apply(&mut state);
        trace!(?patch, "scroll store set");
        self.replace(state);
    }

    /// Add `delta` to the position, clamped into bounds.
    ///
    /// Any delta, however large, leaves the position within bounds.
    pub fn apply_delta(&self, delta: f64) {
        let mut state = self.get();
        state.position = state.clamp(state.position + delta);
        trace!(delta, position = state.position, "scroll store apply_delta");
        self.replace(state);
    }

    /// Round the position to the nearest whole section, clamped into bounds.
    ///
    /// Halves round away from zero.
    pub fn snap(&self) {
        let mut state = self.get();
        state.position = state.clamp(state.position.round());
        trace!(position = state.position, "scroll store snap");
        self.replace(state);
    }

    /// Set `max_scroll` to `sections - 1`.
    ///
    /// The position is not re-clamped here; the next `apply_delta` or `snap`
    /// brings it back into range if the bounds shrank.
    pub fn set_section_count(&self, sections: SectionCount) {
        self.set(ScrollPatch::max_scroll(sections.max_scroll()));
    }

    /// Register `on_change`, called with `(new, previous)` whenever
    /// `selector(state)` changes after a write.
    ///
    /// The selector is evaluated once immediately to seed the previous value;
    /// `on_change` is not called at registration. Dropping the returned
    /// [`Subscription`] detaches the listener.
    ///
    /// A listener may itself write to the store. The nested notification
    /// reaches every other listener immediately; the writing listener is
    /// re-run with the latest state once it returns, so it never misses a
    /// change of its selected value.
    pub fn subscribe<T, S, F>(&self, selector: S, mut on_change: F) -> Subscription
    where
        T: PartialEq + 'static,
        S: Fn(&ScrollState) -> T + 'static,
        F: FnMut(&T, &T) + 'static,
    {
        let mut previous = selector(&self.get());
        let listener = move |state: &ScrollState| {
            let next = selector(state);
            if next != previous {
                let old = std::mem::replace(&mut previous, next);
                on_change(&previous, &old);
            }
        };

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            listener: Rc::new(RefCell::new(listener)),
            missed: Rc::new(Cell::new(false)),
        });
        trace!(id, "scroll store subscribe");

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of attached listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn replace(&self, state: ScrollState) {
        self.inner.state.set(state);
        self.notify();
    }

    fn notify(&self) {
        // Snapshot so listeners can subscribe or unsubscribe while we iterate.
        let listeners: Vec<(u64, Listener, Rc<Cell<bool>>)> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|subscriber| {
                (
                    subscriber.id,
                    Rc::clone(&subscriber.listener),
                    Rc::clone(&subscriber.missed),
                )
            })
            .collect();

        for (id, listener, missed) in listeners {
            if !self.is_subscribed(id) {
                continue;
            }
            // Busy means this listener is further up the stack; it re-runs
            // when it returns.
            let Ok(mut callback) = listener.try_borrow_mut() else {
                missed.set(true);
                continue;
            };
            loop {
                missed.set(false);
                let state = self.get();
                (*callback)(&state);
                if !missed.get() || !self.is_subscribed(id) {
                    break;
                }
            }
        }
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .any(|subscriber| subscriber.id == id)
    }
}

/// Guard for a store listener. Dropping it detaches the listener.
#[must_use = "dropping a Subscription immediately detaches its listener"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Subscription {
    /// Detach the listener now.
    pub fn unsubscribe(self) {}

    /// Whether the listener is still attached to a live store.
    pub fn is_active(&self) -> bool {
        self.store.upgrade().is_some_and(|inner| {
            inner
                .subscribers
                .borrow()
                .iter()
                .any(|subscriber| subscriber.id == self.id)
        })
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            let removed = {
                let mut subscribers = inner.subscribers.borrow_mut();
                let index = subscribers.iter().position(|s| s.id == self.id);
                index.map(|index| subscribers.remove(index))
            };
            // Listener is dropped outside the borrow; it may own other guards.
            drop(removed);
            trace!(id = self.id, "scroll store unsubscribe");
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
