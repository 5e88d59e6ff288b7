//! Stable single-element move used by every reorder operation.
//!
//! # Invariants
//! - Dropping `active` onto `over` places `active` at `over`'s former index.
//! - Every other element keeps its relative order.
//! - Unknown ids and `active == over` leave the sequence untouched.

/// Moves the element at `from` to index `to`, shifting the elements between.
///
/// Out-of-range indices are ignored.
pub fn stable_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Moves the element identified by `active_id` into the slot of `over_id`.
///
/// Returns whether the sequence changed.
pub fn move_by_id<T>(
    items: &mut Vec<T>,
    active_id: &str,
    over_id: &str,
    id_of: impl Fn(&T) -> &str,
) -> bool {
    if active_id == over_id {
        return false;
    }
    let Some(from) = items.iter().position(|item| id_of(item) == active_id) else {
        return false;
    };
    let Some(to) = items.iter().position(|item| id_of(item) == over_id) else {
        return false;
    };
    stable_move(items, from, to);
    true
}
