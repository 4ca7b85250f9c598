//! Tests for the scroll store.
//!
//! Tests verify:
//! - apply_delta and snap clamp into bounds
//! - set merges without clamping
//! - subscriptions fire only on selected-value changes and detach on drop

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Helper: store with `max_scroll = max` and the given position.
fn store_with(position: f64, max: f64) -> ScrollStore {
    ScrollStore::with_state(ScrollState {
        position,
        min_scroll: 0.0,
        max_scroll: max,
    })
}

// ===== Mutators =====

#[test]
fn new_store_starts_at_zero_with_zero_bounds() {
    let store = ScrollStore::new();
    assert_eq!(store.get(), ScrollState::default());
}

#[test]
fn apply_delta_moves_within_bounds() {
    let store = store_with(0.0, 2.0);
    store.apply_delta(0.25);
    assert!((store.position() - 0.25).abs() < 1e-9);
}

#[test]
fn apply_large_negative_delta_from_zero_stays_at_zero() {
    let store = store_with(0.0, 2.0);
    store.apply_delta(-1_000.0);
    assert_eq!(store.position(), 0.0);
}

#[test]
fn apply_large_positive_delta_from_max_stays_at_max() {
    let store = store_with(2.0, 2.0);
    store.apply_delta(1_000.0);
    assert_eq!(store.position(), 2.0);
}

#[test]
fn snap_rounds_to_nearest_section() {
    let store = store_with(1.4, 3.0);
    store.snap();
    assert_eq!(store.position(), 1.0);

    let store = store_with(1.6, 3.0);
    store.snap();
    assert_eq!(store.position(), 2.0);
}

#[test]
fn snap_rounds_half_up_for_positive_positions() {
    let store = store_with(0.5, 3.0);
    store.snap();
    assert_eq!(store.position(), 1.0);
}

#[test]
fn snap_is_idempotent() {
    let store = store_with(1.3, 3.0);
    store.snap();
    let first = store.position();
    store.snap();
    assert_eq!(store.position(), first);
}

#[test]
fn snap_reclamps_out_of_range_position() {
    // set() is trusted and may leave the position out of range
    let store = store_with(0.0, 2.0);
    store.set(ScrollPatch::position(5.0));
    assert_eq!(store.position(), 5.0);

    store.snap();
    assert_eq!(store.position(), 2.0);
}

#[test]
fn set_merges_only_given_fields() {
    let store = store_with(1.0, 4.0);
    store.set(ScrollPatch::max_scroll(2.0));
    let state = store.get();
    assert_eq!(state.position, 1.0);
    assert_eq!(state.min_scroll, 0.0);
    assert_eq!(state.max_scroll, 2.0);
}

#[test]
fn set_section_count_sets_max_scroll() {
    let store = ScrollStore::new();
    store.set_section_count(SectionCount::new(5).unwrap());
    assert_eq!(store.get().max_scroll, 4.0);
}

#[test]
fn clones_share_state() {
    let store = store_with(0.0, 3.0);
    let other = store.clone();
    other.apply_delta(1.0);
    assert_eq!(store.position(), 1.0);
}

// ===== Subscriptions =====

#[test]
fn subscriber_fires_with_new_and_previous_value() {
    let store = store_with(0.0, 3.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let _sub = store.subscribe(
        |state| state.position,
        move |new, old| sink.borrow_mut().push((*new, *old)),
    );

    store.apply_delta(1.0);
    store.apply_delta(1.0);

    assert_eq!(*seen.borrow(), vec![(1.0, 0.0), (2.0, 1.0)]);
}

#[test]
fn subscriber_not_called_at_registration() {
    let store = store_with(1.0, 3.0);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);

    let _sub = store.subscribe(|state| state.position, move |_, _| *counter.borrow_mut() += 1);

    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn subscriber_skips_unchanged_selected_value() {
    let store = store_with(0.0, 3.0);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);

    let _sub = store.subscribe(|state| state.position, move |_, _| *counter.borrow_mut() += 1);

    // Bounds change, position does not
    store.set(ScrollPatch::max_scroll(5.0));
    // Clamped at zero: position does not change
    store.apply_delta(-1.0);

    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn selector_on_bounds_ignores_position_changes() {
    let store = store_with(0.0, 3.0);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);

    let _sub = store.subscribe(|state| state.max_scroll, move |_, _| *counter.borrow_mut() += 1);

    store.apply_delta(1.0);
    assert_eq!(*calls.borrow(), 0);

    store.set(ScrollPatch::max_scroll(4.0));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn multiple_subscribers_are_independent() {
    let store = store_with(0.0, 3.0);
    let a = Rc::new(RefCell::new(0));
    let b = Rc::new(RefCell::new(0));
    let (ca, cb) = (Rc::clone(&a), Rc::clone(&b));

    let sub_a = store.subscribe(|state| state.position, move |_, _| *ca.borrow_mut() += 1);
    let _sub_b = store.subscribe(|state| state.position, move |_, _| *cb.borrow_mut() += 1);

    store.apply_delta(1.0);
    drop(sub_a);
    store.apply_delta(1.0);

    assert_eq!(*a.borrow(), 1);
    assert_eq!(*b.borrow(), 2);
}

#[test]
fn dropping_subscription_detaches_listener() {
    let store = store_with(0.0, 3.0);
    let sub = store.subscribe(|state| state.position, |_, _| {});
    assert_eq!(store.subscriber_count(), 1);
    assert!(sub.is_active());

    drop(sub);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn unsubscribe_detaches_listener() {
    let store = store_with(0.0, 3.0);
    let sub = store.subscribe(|state| state.position, |_, _| {});
    sub.unsubscribe();
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn subscription_outliving_store_is_inactive() {
    let store = store_with(0.0, 3.0);
    let sub = store.subscribe(|state| state.position, |_, _| {});
    drop(store);
    assert!(!sub.is_active());
    // Dropping after the store is gone must not panic
    drop(sub);
}

#[test]
fn listener_may_write_to_store() {
    let store = store_with(0.0, 3.0);
    let writer = store.clone();
    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);

    // Snap whenever the position leaves a whole section
    let _snapper = store.subscribe(
        |state| state.position,
        move |new, _| {
            if new.fract() != 0.0 {
                writer.snap();
            }
        },
    );
    let _observer = store.subscribe(
        |state| state.position,
        move |new, _| sink.borrow_mut().push(*new),
    );

    store.apply_delta(0.75);

    assert_eq!(store.position(), 1.0);
    assert_eq!(observed.borrow().last().copied(), Some(1.0));
}

#[test]
fn writing_listener_is_rerun_with_its_own_write() {
    let store = store_with(0.0, 3.0);
    let writer = store.clone();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    // Leaving section 0 bounces straight on to section 2
    let _bouncer = store.subscribe(
        |state| state.position,
        move |new, old| {
            sink.borrow_mut().push((*new, *old));
            if *old == 0.0 {
                writer.set(ScrollPatch::position(2.0));
            }
        },
    );

    store.set(ScrollPatch::position(1.0));
    assert_eq!(store.position(), 2.0);

    // Back to the value the listener was first told about
    store.set(ScrollPatch::position(1.0));

    assert_eq!(*seen.borrow(), vec![(1.0, 0.0), (2.0, 1.0), (1.0, 2.0)]);
}

#[test]
fn listener_unsubscribed_mid_notification_is_not_called() {
    let store = store_with(0.0, 3.0);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);

    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&victim);
    let _killer = store.subscribe(
        |state| state.position,
        move |_, _| {
            slot.borrow_mut().take();
        },
    );
    *victim.borrow_mut() =
        Some(store.subscribe(|state| state.position, move |_, _| *counter.borrow_mut() += 1));

    store.apply_delta(1.0);

    assert_eq!(*calls.borrow(), 0);
    assert_eq!(store.subscriber_count(), 1);
}

// ===== Invariant =====

#[test]
fn invariant_holds_after_mixed_sequence() {
    let store = store_with(0.0, 4.0);
    let deltas = [0.3, -5.0, 2.7, 9.0, -0.49, 0.0, -1.51];

    for delta in deltas {
        store.apply_delta(delta);
        assert!(store.get().is_in_bounds(), "after delta {}: {:?}", delta, store.get());
        store.snap();
        assert!(store.get().is_in_bounds(), "after snap: {:?}", store.get());
    }
}
