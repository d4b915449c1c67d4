// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event values and the public event-type catalog.

/// The catalog of event types the display list dispatches.
///
/// These names are the wire contract for listeners; the scene crate
/// documents which are bubbling and which are delivered at-target only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventType {
    /// Per-frame tick, delivered depth-first (children before parents).
    Tick,
    /// Stage update is beginning, before tick propagation.
    TickStart,
    /// Tick propagation finished.
    TickEnd,
    /// Draw pass is about to run.
    DrawStart,
    /// Draw pass finished.
    DrawEnd,
    /// Press and release over the same object (bubbling).
    Click,
    /// Double click on the topmost object under the pointer (bubbling).
    DblClick,
    /// Pointer pressed on an object (bubbling).
    MouseDown,
    /// Pointer entered an object or one of its descendants (bubbling).
    MouseOver,
    /// Pointer left an object or one of its descendants (bubbling).
    MouseOut,
    /// Aggregate pointer-enter on an object as a unit (non-bubbling).
    RollOver,
    /// Aggregate pointer-leave on an object as a unit (non-bubbling).
    RollOut,
    /// Pointer moved while pressed; targets the original press object (bubbling).
    PressMove,
    /// Pointer released after a press; targets the original press object (bubbling).
    PressUp,
    /// Pointer pressed anywhere in stage bounds (stage only, non-bubbling).
    StageMouseDown,
    /// Pointer released (stage only, non-bubbling).
    StageMouseUp,
    /// Pointer moved (stage only, non-bubbling).
    StageMouseMove,
    /// Pointer entered the stage bounds (stage only, non-bubbling).
    MouseEnter,
    /// Pointer left the stage bounds (stage only, non-bubbling).
    MouseLeave,
    /// A sprite reached the end of a non-looping animation (at-target).
    AnimationEnd,
    /// An asynchronous leaf finished loading (at-target).
    Complete,
    /// A node was added to a parent (at-target).
    Added,
    /// A node was removed from its parent (at-target).
    Removed,
}

/// Propagation phase, matching the DOM numbering.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal (1).
    Capture,
    /// The target itself (2).
    AtTarget,
    /// Target-to-root traversal (3).
    Bubble,
}

/// Type-specific event data.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum EventPayload {
    /// No payload.
    #[default]
    None,
    /// Pointer position in stage coordinates plus the pointer id
    /// (`-1` is reserved for the mouse).
    Pointer {
        /// X in stage (canvas) coordinates.
        stage_x: f64,
        /// Y in stage (canvas) coordinates.
        stage_y: f64,
        /// Pointer contact id; `-1` for the mouse.
        pointer_id: i32,
        /// True for the primary pointer (the mouse, or the first touch).
        primary: bool,
    },
    /// Elapsed time carried by tick events.
    Tick {
        /// Milliseconds since the previous update.
        delta_ms: f64,
    },
}

/// A single event dispatch in flight.
///
/// Created per dispatch, mutated during the one traversal, then discarded.
/// Listeners must not retain references across dispatches; nothing is
/// reused.
#[derive(Clone, Debug)]
pub struct Event<K> {
    /// The event type being dispatched.
    pub ty: EventType,
    /// Whether the event runs the bubble phase.
    pub bubbles: bool,
    /// Whether [`Self::prevent_default`] has any effect.
    pub cancelable: bool,
    /// The dispatch target (set by [`crate::propagate`]).
    pub target: Option<K>,
    /// The node whose listeners are currently running.
    pub current_target: Option<K>,
    /// Current propagation phase.
    pub phase: Phase,
    /// Type-specific payload.
    pub payload: EventPayload,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_stopped: bool,
    pub(crate) default_prevented: bool,
    pub(crate) remove_requested: bool,
}

impl<K> Event<K> {
    /// Create an event with an empty payload.
    pub fn new(ty: EventType, bubbles: bool, cancelable: bool) -> Self {
        Self {
            ty,
            bubbles,
            cancelable,
            target: None,
            current_target: None,
            phase: Phase::AtTarget,
            payload: EventPayload::None,
            propagation_stopped: false,
            immediate_stopped: false,
            default_prevented: false,
            remove_requested: false,
        }
    }

    /// Attach a payload, builder style.
    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Halt traversal to further nodes after the current one finishes.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Halt traversal immediately, skipping remaining listeners on the
    /// current node as well.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_stopped = true;
    }

    /// Mark the default action prevented (only when `cancelable`).
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// True once [`Self::stop_propagation`] has been called.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// True once [`Self::prevent_default`] has taken effect.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Deregister the listener currently being invoked.
    ///
    /// Takes effect after the current node's listener snapshot finishes, so
    /// sibling listeners in the same dispatch are unaffected.
    pub fn remove(&mut self) {
        self.remove_requested = true;
    }
}
