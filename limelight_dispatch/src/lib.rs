// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limelight Dispatch: deterministic event propagation for display trees.
//!
//! ## Overview
//!
//! This crate implements the three-phase DOM-style propagation model over an
//! arbitrary root→target path of nodes: capture (root towards target), the
//! target itself, then bubble (target back towards root) when the event is
//! marked bubbling. It owns no tree — callers supply the path, typically
//! reconstructed from parent links.
//!
//! ## Pieces
//!
//! - [`Event`]: a short-lived per-dispatch value carrying the event type,
//!   phase, target, payload, and the stop/prevent/remove control flags.
//! - [`Dispatcher`]: a per-node listener registry (capture and bubble lists)
//!   with token-based removal and `once` auto-removal.
//! - [`propagate`]: walks a `(key, &Dispatcher)` path and delivers the event
//!   in capture → at-target → bubble order.
//!
//! ## Dispatch safety
//!
//! Listener lists are snapshotted before each node's delivery, so a listener
//! that adds or removes listeners — including removing *itself* via
//! [`Event::remove`] — cannot skip or double-fire its siblings in the same
//! dispatch. Listeners added during a dispatch first run on the next one.
//!
//! ## At-target semantics
//!
//! The at-target step is folded into the last capture-walk step and delivers
//! to the target's *bubble-phase* listeners. A capture-phase listener on the
//! target itself therefore never fires, matching the model this crate
//! reimplements; register target listeners without `use_capture`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod event;

pub use dispatcher::{Dispatcher, ListenerToken};
pub use event::{Event, EventPayload, EventType, Phase};

/// Deliver `evt` along `path` (root first, target last).
///
/// Phase order: every entry except the last receives the capture phase
/// top-down; the last entry receives the at-target phase; then, if
/// [`Event::bubbles`] is set, every non-target entry receives the bubble
/// phase bottom-up. `propagation_stopped` is checked between levels and
/// `immediate_propagation_stopped` between listeners within a level.
///
/// An empty path is a no-op. Non-bubbling events skip the capture walk
/// entirely and collapse to one at-target delivery, regardless of path
/// length.
pub fn propagate<K: Copy>(path: &[(K, &Dispatcher<K>)], evt: &mut Event<K>) {
    let Some(&(target, dispatcher)) = path.last() else {
        return;
    };
    evt.target = Some(target);

    if !evt.bubbles {
        evt.phase = Phase::AtTarget;
        dispatcher.dispatch_to(target, evt);
        return;
    }

    let last = path.len() - 1;
    for (i, (key, dispatcher)) in path.iter().enumerate() {
        if evt.propagation_stopped() {
            break;
        }
        evt.phase = if i == last { Phase::AtTarget } else { Phase::Capture };
        dispatcher.dispatch_to(*key, evt);
    }

    if !evt.propagation_stopped() {
        for (key, dispatcher) in path[..last].iter().rev() {
            evt.phase = Phase::Bubble;
            dispatcher.dispatch_to(*key, evt);
            if evt.propagation_stopped() {
                break;
            }
        }
    }
}
