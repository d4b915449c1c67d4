// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking and the interaction event pipeline.
//!
//! The embedding feeds raw pointer input through
//! [`pointer_down`](Stage::pointer_down),
//! [`pointer_move`](Stage::pointer_move),
//! [`pointer_up`](Stage::pointer_up), and
//! [`double_click`](Stage::double_click); the stage turns it into the
//! interaction event stream: stage-level broadcasts, bubbling target
//! events, press-capture drags, and hover enter/leave chains.

use alloc::vec::Vec;

use limelight_dispatch::{EventPayload, EventType};

use crate::stage::Stage;
use crate::types::{NodeId, PickMode};

/// The pointer id the stage reserves for the system mouse.
///
/// Touches and pens use non-negative ids from the embedding; the mouse
/// gets a fixed slot so hover state survives between touches.
pub const MOUSE_POINTER_ID: i32 = -1;

/// Tracked state for one active pointer.
#[derive(Clone, Debug, Default)]
pub struct PointerState {
    /// Last known stage-space x position.
    pub x: f64,
    /// Last known stage-space y position.
    pub y: f64,
    /// Whether the pointer is currently inside the stage rectangle.
    pub in_bounds: bool,
    /// Primary pointers drive hover; at most one should be primary.
    pub primary: bool,
    /// Node that received the press, held until release so drags keep
    /// delivering even when the pointer leaves it.
    pub(crate) press_target: Option<NodeId>,
    /// Ancestor chain (root first) under the pointer at the last hover
    /// pass.
    pub(crate) hover_path: Vec<NodeId>,
}

impl Stage {
    /// Turn hover tracking on or off.
    ///
    /// Hover is opt-in because it runs a pick on every move; without it
    /// the move pipeline only updates positions and drag targets.
    /// Disabling clears stored hover chains without emitting exit
    /// events.
    pub fn enable_mouse_over(&mut self, enabled: bool) {
        log::debug!("mouse-over tracking {}", if enabled { "enabled" } else { "disabled" });
        self.mouse_over_enabled = enabled;
        if !enabled {
            for state in self.pointers.values_mut() {
                state.hover_path.clear();
            }
        }
    }

    /// Whether hover tracking is currently on.
    pub fn mouse_over_enabled(&self) -> bool {
        self.mouse_over_enabled
    }

    /// Tracked state for a pointer, if it has reported any input.
    pub fn pointer(&self, pointer_id: i32) -> Option<&PointerState> {
        self.pointers.get(&pointer_id)
    }

    /// Whether the primary mouse pointer is inside the stage.
    pub fn mouse_in_bounds(&self) -> bool {
        self.pointers
            .get(&MOUSE_POINTER_ID)
            .is_some_and(|p| p.in_bounds)
    }

    /// Feed a press at stage-space `(x, y)`.
    ///
    /// Emits `StageMouseDown` on the stage, picks the press target
    /// (listener or not: anything mouse-enabled can be dragged), and
    /// bubbles `MouseDown` from it.
    pub fn pointer_down(&mut self, pointer_id: i32, x: f64, y: f64, primary: bool) {
        log::trace!("pointer {pointer_id} down at ({x}, {y})");
        let in_bounds = self.contains_point(x, y);
        {
            let state = self.pointer_entry(pointer_id, primary);
            state.x = x;
            state.y = y;
            state.in_bounds = in_bounds;
            state.primary = primary;
        }
        let payload = pointer_payload(pointer_id, x, y, primary);
        if in_bounds {
            self.dispatch_by_type(self.root(), EventType::StageMouseDown, false, payload);
            let target = self.object_under_point(
                x,
                y,
                PickMode::Pointer {
                    require_listener: false,
                },
            );
            self.pointer_entry(pointer_id, primary).press_target = target;
            if let Some(target) = target {
                self.dispatch_by_type(target, EventType::MouseDown, true, payload);
            }
        }
        if let Some(next) = &mut self.next_stage {
            next.pointer_down(pointer_id, x, y, primary);
        }
    }

    /// Feed a move to stage-space `(x, y)`.
    ///
    /// Order per move: stage enter/leave, `StageMouseMove`, `PressMove`
    /// to the held press target, then the hover pass when enabled.
    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) {
        log::trace!("pointer {pointer_id} move to ({x}, {y})");
        let in_bounds = self.contains_point(x, y);
        let primary_default = pointer_id == MOUSE_POINTER_ID;
        let (was_in_bounds, primary, press_target) = {
            let state = self.pointer_entry(pointer_id, primary_default);
            let prev = (state.in_bounds, state.primary, state.press_target);
            state.x = x;
            state.y = y;
            state.in_bounds = in_bounds;
            prev
        };
        if was_in_bounds != in_bounds {
            let ty = if in_bounds {
                EventType::MouseEnter
            } else {
                EventType::MouseLeave
            };
            self.dispatch_by_type(self.root(), ty, false, EventPayload::None);
        }
        if in_bounds || self.mouse_move_outside {
            let payload = pointer_payload(pointer_id, x, y, primary);
            self.dispatch_by_type(self.root(), EventType::StageMouseMove, false, payload);
            if let Some(target) = press_target {
                if self.is_alive(target) {
                    self.dispatch_by_type(target, EventType::PressMove, true, payload);
                }
            }
            if self.mouse_over_enabled && primary {
                self.update_hover(pointer_id, x, y);
            }
        }
        if let Some(next) = &mut self.next_stage {
            next.pointer_move(pointer_id, x, y);
        }
    }

    /// Feed a release at stage-space `(x, y)`.
    ///
    /// Emits `StageMouseUp`, bubbles `PressUp` from the press target,
    /// and bubbles `Click` when the release still lands on the pressed
    /// node. Non-mouse pointers are forgotten afterwards.
    pub fn pointer_up(&mut self, pointer_id: i32, x: f64, y: f64) {
        log::trace!("pointer {pointer_id} up at ({x}, {y})");
        let in_bounds = self.contains_point(x, y);
        let primary_default = pointer_id == MOUSE_POINTER_ID;
        let (primary, press_target) = {
            let state = self.pointer_entry(pointer_id, primary_default);
            state.x = x;
            state.y = y;
            state.in_bounds = in_bounds;
            let press = state.press_target.take();
            (state.primary, press)
        };
        let payload = pointer_payload(pointer_id, x, y, primary);
        if in_bounds {
            self.dispatch_by_type(self.root(), EventType::StageMouseUp, false, payload);
        }
        if let Some(press) = press_target {
            if self.is_alive(press) {
                self.dispatch_by_type(press, EventType::PressUp, true, payload);
                let under = self.object_under_point(
                    x,
                    y,
                    PickMode::Pointer {
                        require_listener: false,
                    },
                );
                if under == Some(press) {
                    self.dispatch_by_type(press, EventType::Click, true, payload);
                }
            }
        }
        if pointer_id != MOUSE_POINTER_ID {
            self.pointers.remove(&pointer_id);
        }
        if let Some(next) = &mut self.next_stage {
            next.pointer_up(pointer_id, x, y);
        }
    }

    /// Feed a double click at stage-space `(x, y)`; bubbles `DblClick`
    /// from the top-most target.
    pub fn double_click(&mut self, x: f64, y: f64) {
        let target = self.object_under_point(
            x,
            y,
            PickMode::Pointer {
                require_listener: false,
            },
        );
        if let Some(target) = target {
            let payload = pointer_payload(MOUSE_POINTER_ID, x, y, true);
            self.dispatch_by_type(target, EventType::DblClick, true, payload);
        }
        if let Some(next) = &mut self.next_stage {
            next.double_click(x, y);
        }
    }

    /// Recompute the hover chain and emit the exit/enter diff.
    ///
    /// The old and new root-to-leaf chains share a common prefix;
    /// everything below it on the old side exits, everything below it
    /// on the new side enters. All exits are emitted before any enter:
    /// `MouseOut` bubbling from the old leaf, `RollOut` at-target up
    /// the old tail (deepest first), then `MouseOver` bubbling from
    /// the new leaf and `RollOver` at-target down from the new tail's
    /// deepest node.
    fn update_hover(&mut self, pointer_id: i32, x: f64, y: f64) {
        let target = self.object_under_point(
            x,
            y,
            PickMode::Pointer {
                require_listener: true,
            },
        );
        let new_path = match target {
            Some(t) => self.path_to_root(t),
            None => Vec::new(),
        };
        let old_path = self
            .pointers
            .get(&pointer_id)
            .map(|p| p.hover_path.clone())
            .unwrap_or_default();
        if old_path == new_path {
            return;
        }
        if let Some(state) = self.pointers.get_mut(&pointer_id) {
            state.hover_path = new_path.clone();
        }

        let common = old_path
            .iter()
            .zip(new_path.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let primary = self
            .pointers
            .get(&pointer_id)
            .is_some_and(|p| p.primary);
        let payload = pointer_payload(pointer_id, x, y, primary);

        if let Some(old_leaf) = old_path.last() {
            if self.is_alive(*old_leaf) && old_path.last() != new_path.last() {
                self.dispatch_by_type(*old_leaf, EventType::MouseOut, true, payload);
            }
        }
        for id in old_path[common..].iter().rev() {
            if self.is_alive(*id) {
                self.dispatch_by_type(*id, EventType::RollOut, false, payload);
            }
        }
        if let Some(new_leaf) = new_path.last() {
            if old_path.last() != new_path.last() {
                self.dispatch_by_type(*new_leaf, EventType::MouseOver, true, payload);
            }
        }
        for id in new_path[common..].iter().rev() {
            self.dispatch_by_type(*id, EventType::RollOver, false, payload);
        }
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x <= self.width() && y <= self.height()
    }

    fn pointer_entry(&mut self, pointer_id: i32, primary: bool) -> &mut PointerState {
        self.pointers.entry(pointer_id).or_insert_with(|| PointerState {
            primary,
            ..PointerState::default()
        })
    }

}

fn pointer_payload(pointer_id: i32, x: f64, y: f64, primary: bool) -> EventPayload {
    EventPayload::Pointer {
        stage_x: x,
        stage_y: y,
        pointer_id,
        primary,
    }
}
