// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The update cycle: tick propagation and the recursive draw pass.

use limelight_dispatch::{Event, EventPayload, EventType};
use limelight_graphics::Painter;

use crate::stage::{Content, Stage};
use crate::types::{NodeFlags, NodeId};

#[cfg(feature = "std")]
mod num {
    pub(super) fn round(x: f64) -> f64 {
        x.round()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod num {
    pub(super) fn round(x: f64) -> f64 {
        libm::round(x)
    }
}

/// State threaded through one draw recursion.
///
/// Deliberately explicit rather than ambient: two stages (or a cache
/// render and a screen render) can run with different settings without
/// touching shared state.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawPass {
    /// Round translations of [`NodeFlags::SNAP_TO_PIXEL`] nodes to
    /// whole pixels.
    pub snap_to_pixel: bool,
}

impl Stage {
    /// Run one frame: tick, then draw, bracketed by the stage events.
    ///
    /// Sequence: `TickStart`, tick pass (children before parents),
    /// `TickEnd`, `DrawStart`, optional clear, draw pass, `DrawEnd`.
    pub fn update(&mut self, painter: &mut dyn Painter, delta_ms: f64) {
        self.dispatch_stage(EventType::TickStart);
        if self.tick_on_update {
            self.tick(delta_ms);
        }
        self.dispatch_stage(EventType::TickEnd);

        self.dispatch_stage(EventType::DrawStart);
        if self.auto_clear {
            painter.clear();
        }
        let pass = DrawPass {
            snap_to_pixel: self.snap_to_pixel_enabled,
        };
        self.draw_node(self.root(), painter, &pass, false);
        self.dispatch_stage(EventType::DrawEnd);
    }

    /// Propagate a tick through the tree, depth-first.
    ///
    /// Children tick before their own parent's `Tick` listeners, so a
    /// parent observes fully advanced children. Sprite-like leaves
    /// advance here and surface their animation events.
    pub fn tick(&mut self, delta_ms: f64) {
        self.tick_subtree(self.root(), delta_ms);
    }

    fn tick_subtree(&mut self, id: NodeId, delta_ms: f64) {
        let children = self.node(id).children.clone();
        for child in children {
            // Snapshot: listeners may have restructured the tree.
            if self.is_alive(child) {
                self.tick_subtree(child, delta_ms);
            }
        }
        let surfaced = match &mut self.node_mut(id).content {
            Content::Leaf(d) => d.advance(delta_ms),
            Content::Container => None,
        };
        if let Some(ty) = surfaced {
            let mut evt = Event::new(ty, false, false);
            self.dispatch_at(id, &mut evt);
        }
        self.dispatch_by_type(
            id,
            EventType::Tick,
            false,
            EventPayload::Tick { delta_ms },
        );
    }

    /// Draw `id` with its full context: mask clip, local transform,
    /// alpha, composite, and shadow, inside one save/restore pair.
    pub(crate) fn draw_node(
        &self,
        id: NodeId,
        painter: &mut dyn Painter,
        pass: &DrawPass,
        ignore_cache: bool,
    ) {
        let node = self.node(id);
        painter.save();
        // The mask clips in the parent's space, before the local
        // transform applies.
        if let Some(mask) = &node.mask {
            if !mask.is_empty() {
                mask.draw_as_path(painter);
                painter.clip();
            }
        }
        let mut m = node.props.matrix();
        if pass.snap_to_pixel && node.props.flags.contains(NodeFlags::SNAP_TO_PIXEL) {
            m.tx = num::round(m.tx);
            m.ty = num::round(m.ty);
        }
        painter.transform(&m);
        painter.multiply_alpha(node.props.alpha);
        if let Some(op) = node.props.composite {
            painter.set_composite(op);
        }
        if let Some(shadow) = &node.props.shadow {
            painter.set_shadow(Some(shadow));
        }
        self.draw_content(id, painter, pass, ignore_cache);
        painter.restore();
    }

    /// Draw the content of `id` in its own local space, without the
    /// node's own context.
    ///
    /// A valid cache short-circuits everything: the recording replays
    /// and the sub-tree is not visited, so content changed since the
    /// last [`update_cache`](Stage::update_cache) stays invisible —
    /// that staleness is the caching contract.
    pub(crate) fn draw_content(
        &self,
        id: NodeId,
        painter: &mut dyn Painter,
        pass: &DrawPass,
        ignore_cache: bool,
    ) {
        let node = self.node(id);
        if !ignore_cache {
            if let Some(cache) = &node.cache {
                cache.recording.replay(painter);
                return;
            }
        }
        match &node.content {
            Content::Leaf(d) => d.draw(painter),
            Content::Container => {
                let children = node.children.clone();
                for child in children {
                    if !self.is_alive(child) {
                        continue;
                    }
                    let props = &self.node(child).props;
                    if !props.flags.contains(NodeFlags::VISIBLE) || props.alpha <= 0.0 {
                        continue;
                    }
                    self.draw_node(child, painter, pass, false);
                }
            }
        }
    }

    fn dispatch_stage(&self, ty: EventType) {
        self.dispatch_by_type(self.root(), ty, false, EventPayload::None);
    }
}
