// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node listener registry.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::event::{Event, EventType, Phase};

/// Removal handle returned by [`Dispatcher::add_listener`].
///
/// Closures cannot be compared, so the token — not the closure — identifies
/// a registration for removal. Tokens are unique per dispatcher.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerToken(u64);

type Callback<K> = Rc<RefCell<dyn FnMut(&mut Event<K>)>>;

struct Entry<K> {
    token: ListenerToken,
    ty: EventType,
    capture: bool,
    once: bool,
    cb: Callback<K>,
}

impl<K> Clone for Entry<K> {
    fn clone(&self) -> Self {
        Self {
            token: self.token,
            ty: self.ty,
            capture: self.capture,
            once: self.once,
            cb: self.cb.clone(),
        }
    }
}

/// Listener registry for one node.
///
/// Uses interior mutability so delivery works through `&self` while the
/// owning tree stays borrowed; every delivery iterates over a snapshot of
/// the matching entries, making add/remove during dispatch safe.
pub struct Dispatcher<K> {
    entries: RefCell<Vec<Entry<K>>>,
    next_token: Cell<u64>,
}

impl<K: Copy> Default for Dispatcher<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> core::fmt::Debug for Dispatcher<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners", &self.entries.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy> Dispatcher<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_token: Cell::new(1),
        }
    }

    /// Register a listener for `ty`.
    ///
    /// `use_capture` selects the capture list; otherwise the bubble list,
    /// which also receives at-target deliveries. Registering the same
    /// closure twice yields two registrations — there is no de-duplication.
    pub fn add_listener(
        &self,
        ty: EventType,
        use_capture: bool,
        f: impl FnMut(&mut Event<K>) + 'static,
    ) -> ListenerToken {
        self.push(ty, use_capture, false, f)
    }

    /// Register a listener that removes itself after its first invocation.
    pub fn once(
        &self,
        ty: EventType,
        use_capture: bool,
        f: impl FnMut(&mut Event<K>) + 'static,
    ) -> ListenerToken {
        self.push(ty, use_capture, true, f)
    }

    fn push(
        &self,
        ty: EventType,
        capture: bool,
        once: bool,
        f: impl FnMut(&mut Event<K>) + 'static,
    ) -> ListenerToken {
        let token = ListenerToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        self.entries.borrow_mut().push(Entry {
            token,
            ty,
            capture,
            once,
            cb: Rc::new(RefCell::new(f)),
        });
        token
    }

    /// Remove a registration. Returns `false` (soft no-op) when the token
    /// is unknown or already removed.
    pub fn remove_listener(&self, token: ListenerToken) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.token != token);
        entries.len() != before
    }

    /// Remove all listeners, or only those for `ty` when given.
    pub fn remove_all(&self, ty: Option<EventType>) {
        match ty {
            Some(ty) => self.entries.borrow_mut().retain(|e| e.ty != ty),
            None => self.entries.borrow_mut().clear(),
        }
    }

    /// True if any listener (either phase) is registered for `ty`.
    pub fn has_listener(&self, ty: EventType) -> bool {
        self.entries.borrow().iter().any(|e| e.ty == ty)
    }

    /// True if a listener for `ty` exists on the given phase list.
    pub fn has_phase_listener(&self, ty: EventType, capture: bool) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.ty == ty && e.capture == capture)
    }

    /// Deliver `evt` to this node's listeners for the event's current phase.
    ///
    /// Capture deliveries use the capture list; at-target and bubble
    /// deliveries use the bubble list. Iterates over a snapshot taken at
    /// entry, then applies `once` and [`Event::remove`] removals.
    pub fn dispatch_to(&self, current: K, evt: &mut Event<K>) {
        let want_capture = evt.phase == Phase::Capture;
        let snapshot: Vec<Entry<K>> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.ty == evt.ty && e.capture == want_capture)
            .cloned()
            .collect();
        if snapshot.is_empty() {
            return;
        }

        evt.current_target = Some(current);
        let mut dead: Vec<ListenerToken> = Vec::new();
        for entry in &snapshot {
            if evt.immediate_stopped {
                break;
            }
            evt.remove_requested = false;
            (entry.cb.borrow_mut())(evt);
            if entry.once || evt.remove_requested {
                dead.push(entry.token);
            }
        }
        evt.remove_requested = false;

        if !dead.is_empty() {
            self.entries
                .borrow_mut()
                .retain(|e| !dead.contains(&e.token));
        }
    }
}
