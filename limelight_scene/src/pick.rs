// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-accurate hit testing.
//!
//! Picking replays the same draw code that puts pixels on screen into a
//! [`PixelProbe`] aimed at the query point, so whatever would be painted
//! is exactly what is hittable: vector fills and strokes, masks, caches,
//! and hit areas all participate with no separate geometry model.

use alloc::vec::Vec;
use kurbo::Point;
use limelight_dispatch::EventType;
use limelight_graphics::{Color, Paint, Painter, PixelProbe};

use crate::draw::DrawPass;
use crate::stage::{Content, Stage};
use crate::types::{NodeFlags, NodeId, PickMode};

/// Listener types that mark a node as interactive for
/// [`PickMode::Pointer`] with `require_listener` set.
const POINTER_EVENTS: [EventType; 9] = [
    EventType::Click,
    EventType::DblClick,
    EventType::MouseDown,
    EventType::MouseOver,
    EventType::MouseOut,
    EventType::RollOver,
    EventType::RollOut,
    EventType::PressMove,
    EventType::PressUp,
];

impl Stage {
    /// Whether `(x, y)` in the node's local space lands on a painted
    /// pixel of its content.
    ///
    /// The node's own transform, mask, and alpha do not apply; callers
    /// holding a parent-space point convert with
    /// [`global_to_local`](Stage::global_to_local) first.
    pub fn hit_test(&self, id: NodeId, x: f64, y: f64) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut probe = PixelProbe::new(Point::new(x, y));
        self.draw_content(id, &mut probe, &DrawPass::default(), false);
        probe.hit()
    }

    /// The front-most descendant under the stage-space point, or
    /// `None`.
    ///
    /// In [`PickMode::Pointer`], a container whose
    /// [`NodeFlags::MOUSE_CHILDREN`] flag is cleared claims hits on its
    /// descendants; the outermost such container wins.
    pub fn object_under_point(&self, x: f64, y: f64, mode: PickMode) -> Option<NodeId> {
        let mut scratch = Vec::new();
        self.pick_in(self.root(), Point::new(x, y), mode, false, &mut scratch, true)
    }

    /// Every descendant under the stage-space point, front-most first.
    ///
    /// Unlike [`object_under_point`](Stage::object_under_point), the
    /// list always names the actual leaves; `MOUSE_CHILDREN` only
    /// redirects single-target picking.
    pub fn objects_under_point(&self, x: f64, y: f64, mode: PickMode) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.pick_in(self.root(), Point::new(x, y), mode, false, &mut out, false);
        out
    }

    /// Scan the children of `id` front-to-back.
    ///
    /// `active_listener` records that some ancestor already satisfied
    /// the listener requirement, so whole interactive sub-trees pick
    /// without per-leaf listeners.
    fn pick_in(
        &self,
        id: NodeId,
        pt: Point,
        mode: PickMode,
        active_listener: bool,
        out: &mut Vec<NodeId>,
        first_only: bool,
    ) -> Option<NodeId> {
        let (mouse, require_listener) = match mode {
            PickMode::All => (false, false),
            PickMode::Pointer { require_listener } => (true, require_listener),
        };
        let children = self.node(id).children.clone();
        for child in children.into_iter().rev() {
            if !self.is_alive(child) {
                continue;
            }
            let node = self.node(child);
            let hit_area = node.hit_area.filter(|h| self.is_alive(*h));
            // A hit area stands in for visibility: an invisible proxy
            // still makes its owner hittable.
            if !node.props.flags.contains(NodeFlags::VISIBLE)
                || (hit_area.is_none() && node.props.alpha <= 0.0)
            {
                continue;
            }
            if mouse && !node.props.flags.contains(NodeFlags::MOUSE_ENABLED) {
                continue;
            }
            if hit_area.is_none() && !self.mask_allows(child, pt) {
                continue;
            }
            // A cached container is a unit: `covers` replays its
            // recording, so live children stay out of picking until
            // the cache is refreshed.
            let recurse = hit_area.is_none()
                && node.cache.is_none()
                && matches!(node.content, Content::Container);
            if recurse {
                let inherited = active_listener
                    || (require_listener && self.has_pointer_listener(child));
                let found = self.pick_in(child, pt, mode, inherited, out, first_only);
                if first_only {
                    if let Some(found) = found {
                        return Some(self.claim(id, found, mouse));
                    }
                }
            } else {
                if mouse
                    && require_listener
                    && !active_listener
                    && !self.has_pointer_listener(child)
                {
                    continue;
                }
                if self.covers(child, hit_area, pt) {
                    if first_only {
                        return Some(self.claim(id, child, mouse));
                    }
                    out.push(child);
                }
            }
        }
        None
    }

    /// Substitute the scanning container for `found` when it keeps its
    /// children out of pointer targeting.
    fn claim(&self, scanner: NodeId, found: NodeId, mouse: bool) -> NodeId {
        if mouse && !self.node(scanner).props.flags.contains(NodeFlags::MOUSE_CHILDREN) {
            scanner
        } else {
            found
        }
    }

    /// Whether the node (or its hit area) paints the stage-space point.
    fn covers(&self, id: NodeId, hit_area: Option<NodeId>, pt: Point) -> bool {
        let Some(props) = self.concatenated_props(id) else {
            return false;
        };
        let mut probe = PixelProbe::new(pt);
        match hit_area {
            Some(area) => {
                // The hit area is tested as an opaque unit in the
                // owner's local space, with its own transform applied.
                let mut m = props.matrix;
                m.append_matrix(&self.node(area).props.matrix());
                probe.transform(&m);
                probe.multiply_alpha(self.node(area).props.alpha);
                self.draw_content(area, &mut probe, &DrawPass::default(), false);
            }
            None => {
                probe.transform(&props.matrix);
                probe.multiply_alpha(props.alpha);
                self.draw_content(id, &mut probe, &DrawPass::default(), false);
            }
        }
        probe.hit()
    }

    /// Whether the node's mask admits the stage-space point. An absent
    /// or empty mask admits everything.
    fn mask_allows(&self, id: NodeId, pt: Point) -> bool {
        let node = self.node(id);
        let Some(mask) = &node.mask else {
            return true;
        };
        if mask.is_empty() {
            return true;
        }
        let mut probe = PixelProbe::new(pt);
        if let Some(parent) = node.parent {
            if let Some(m) = self.concatenated_matrix(parent) {
                probe.transform(&m);
            }
        }
        mask.draw_as_path(&mut probe);
        probe.set_fill_paint(Some(&Paint::Solid(Color::BLACK)));
        probe.fill();
        probe.hit()
    }

    pub(crate) fn has_pointer_listener(&self, id: NodeId) -> bool {
        let dispatcher = &self.node(id).dispatcher;
        POINTER_EVENTS.iter().any(|ty| dispatcher.has_listener(*ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::Shape;
    use alloc::boxed::Box;
    use alloc::vec;
    use limelight_graphics::Graphics;

    fn rect_shape(x: f64, y: f64, w: f64, h: f64) -> Content {
        let mut s = Shape::new();
        s.graphics
            .begin_fill(Paint::Solid(Color::BLACK))
            .rect(x, y, w, h);
        Content::Leaf(Box::new(s))
    }

    #[test]
    fn hit_test_uses_local_space() {
        let mut stage = Stage::new(100.0, 100.0);
        let a = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        stage.set_position(a, 50.0, 50.0);
        // The node's own transform does not apply.
        assert!(stage.hit_test(a, 5.0, 5.0));
        assert!(!stage.hit_test(a, 55.0, 55.0));
    }

    #[test]
    fn front_most_child_wins() {
        let mut stage = Stage::new(100.0, 100.0);
        let back = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 20.0, 20.0))
            .unwrap();
        let front = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 20.0, 20.0))
            .unwrap();
        assert_eq!(
            stage.object_under_point(5.0, 5.0, PickMode::All),
            Some(front)
        );
        let all = stage.objects_under_point(5.0, 5.0, PickMode::All);
        assert_eq!(all, vec![front, back]);
    }

    #[test]
    fn transforms_carry_into_picking() {
        let mut stage = Stage::new(100.0, 100.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        stage.set_position(group, 40.0, 0.0);
        let leaf = stage.add_child(group, rect_shape(0.0, 0.0, 10.0, 10.0)).unwrap();
        stage.set_position(leaf, 0.0, 40.0);
        assert_eq!(
            stage.object_under_point(45.0, 45.0, PickMode::All),
            Some(leaf)
        );
        assert_eq!(stage.object_under_point(5.0, 5.0, PickMode::All), None);
    }

    #[test]
    fn invisible_nodes_do_not_pick() {
        let mut stage = Stage::new(100.0, 100.0);
        let a = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        stage.set_visible(a, false);
        assert_eq!(stage.object_under_point(5.0, 5.0, PickMode::All), None);
    }

    #[test]
    fn masks_exclude_points_outside() {
        let mut stage = Stage::new(100.0, 100.0);
        let a = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 20.0, 20.0))
            .unwrap();
        let mut mask = Graphics::new();
        mask.rect(0.0, 0.0, 10.0, 10.0);
        stage.set_mask(a, Some(mask));
        assert_eq!(stage.object_under_point(5.0, 5.0, PickMode::All), Some(a));
        assert_eq!(stage.object_under_point(15.0, 15.0, PickMode::All), None);
    }

    #[test]
    fn mouse_enabled_gates_the_sub_tree() {
        let mut stage = Stage::new(100.0, 100.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        let leaf = stage.add_child(group, rect_shape(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mode = PickMode::Pointer {
            require_listener: false,
        };
        assert_eq!(stage.object_under_point(5.0, 5.0, mode), Some(leaf));
        let flags = stage.flags(group).unwrap();
        stage.set_flags(group, flags - NodeFlags::MOUSE_ENABLED);
        assert_eq!(stage.object_under_point(5.0, 5.0, mode), None);
        // Non-pointer picking ignores the flag entirely.
        assert_eq!(stage.object_under_point(5.0, 5.0, PickMode::All), Some(leaf));
    }

    #[test]
    fn container_without_mouse_children_claims_the_hit() {
        let mut stage = Stage::new(100.0, 100.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        let leaf = stage.add_child(group, rect_shape(0.0, 0.0, 10.0, 10.0)).unwrap();
        let flags = stage.flags(group).unwrap();
        stage.set_flags(group, flags - NodeFlags::MOUSE_CHILDREN);
        let mode = PickMode::Pointer {
            require_listener: false,
        };
        assert_eq!(stage.object_under_point(5.0, 5.0, mode), Some(group));
        // Collecting still reports the leaf itself.
        assert_eq!(stage.objects_under_point(5.0, 5.0, mode), vec![leaf]);
    }

    #[test]
    fn require_listener_skips_inert_leaves() {
        let mut stage = Stage::new(100.0, 100.0);
        let a = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        let mode = PickMode::Pointer {
            require_listener: true,
        };
        assert_eq!(stage.object_under_point(5.0, 5.0, mode), None);
        stage.add_listener(a, EventType::Click, false, |_| {});
        assert_eq!(stage.object_under_point(5.0, 5.0, mode), Some(a));
    }

    #[test]
    fn ancestor_listener_covers_descendants() {
        let mut stage = Stage::new(100.0, 100.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        let leaf = stage.add_child(group, rect_shape(0.0, 0.0, 10.0, 10.0)).unwrap();
        stage.add_listener(group, EventType::Click, false, |_| {});
        let mode = PickMode::Pointer {
            require_listener: true,
        };
        assert_eq!(stage.object_under_point(5.0, 5.0, mode), Some(leaf));
    }

    #[test]
    fn hit_area_replaces_content_geometry() {
        let mut stage = Stage::new(100.0, 100.0);
        let owner = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 4.0, 4.0))
            .unwrap();
        // An invisible proxy twice the size, parented elsewhere.
        let proxy = stage
            .add_child(stage.root(), rect_shape(0.0, 0.0, 8.0, 8.0))
            .unwrap();
        stage.remove_child(proxy);
        stage.set_hit_area(owner, Some(proxy));
        assert_eq!(stage.object_under_point(7.0, 7.0, PickMode::All), Some(owner));
    }

    #[test]
    fn zero_alpha_content_is_not_hit() {
        let mut stage = Stage::new(100.0, 100.0);
        let mut s = Shape::new();
        s.graphics
            .begin_fill(Paint::Solid(Color::rgba(0, 0, 0, 0)))
            .rect(0.0, 0.0, 10.0, 10.0);
        stage.add_child(stage.root(), Content::Leaf(Box::new(s)));
        assert_eq!(stage.object_under_point(5.0, 5.0, PickMode::All), None);
    }

    #[test]
    fn stroke_hits_follow_the_pen_width() {
        let mut stage = Stage::new(100.0, 100.0);
        let mut s = Shape::new();
        s.graphics
            .begin_stroke(Paint::Solid(Color::BLACK))
            .set_stroke_style(limelight_graphics::StrokeStyle::new(4.0))
            .move_to(0.0, 10.0)
            .line_to(20.0, 10.0);
        let a = stage.add_child(stage.root(), Content::Leaf(Box::new(s))).unwrap();
        assert_eq!(stage.object_under_point(10.0, 11.0, PickMode::All), Some(a));
        assert_eq!(stage.object_under_point(10.0, 15.0, PickMode::All), None);
    }
}
