// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate-space conversion and bounds aggregation.

use kurbo::{Point, Rect};

use limelight_geom::{Matrix2D, transform_rect_bbox, union_opt};

use crate::stage::{Content, Stage};
use crate::types::{ConcatProps, NodeFlags, NodeId};

impl Stage {
    /// The node's own transform, relative to its parent.
    pub fn local_matrix(&self, id: NodeId) -> Option<Matrix2D> {
        self.node_opt(id).map(|n| n.props.matrix())
    }

    /// The node's transform all the way from stage space.
    ///
    /// Built by prepending each ancestor's local matrix while walking
    /// toward the root, so the node's own transform applies first.
    pub fn concatenated_matrix(&self, id: NodeId) -> Option<Matrix2D> {
        if !self.is_alive(id) {
            return None;
        }
        let mut m = self.node(id).props.matrix();
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            m.prepend_matrix(&self.node(p).props.matrix());
            cur = self.node(p).parent;
        }
        Some(m)
    }

    /// Concatenated transform plus the merged render state of the
    /// ancestor chain.
    pub fn concatenated_props(&self, id: NodeId) -> Option<ConcatProps> {
        if !self.is_alive(id) {
            return None;
        }
        let mut out = ConcatProps {
            matrix: Matrix2D::IDENTITY,
            alpha: 1.0,
            shadow: None,
            composite: None,
            visible: true,
        };
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.node(c);
            out.matrix.prepend_matrix(&node.props.matrix());
            out.alpha *= node.props.alpha;
            // Nearest explicit value wins; walking target-to-root, the
            // first one seen is the nearest.
            if out.shadow.is_none() {
                out.shadow = node.props.shadow.clone();
            }
            if out.composite.is_none() {
                out.composite = node.props.composite;
            }
            if !node.props.flags.contains(NodeFlags::VISIBLE) || node.props.alpha <= 0.0 {
                out.visible = false;
            }
            cur = node.parent;
        }
        Some(out)
    }

    /// Map a point in the node's local space to stage space.
    pub fn local_to_global(&self, id: NodeId, pt: Point) -> Option<Point> {
        self.concatenated_matrix(id)
            .map(|m| m.transform_point(pt.x, pt.y))
    }

    /// Map a stage-space point into the node's local space.
    pub fn global_to_local(&self, id: NodeId, pt: Point) -> Option<Point> {
        let mut m = self.concatenated_matrix(id)?;
        m.invert();
        Some(m.transform_point(pt.x, pt.y))
    }

    /// Map a point from one node's local space into another's.
    pub fn local_to_local(&self, from: NodeId, to: NodeId, pt: Point) -> Option<Point> {
        let global = self.local_to_global(from, pt)?;
        self.global_to_local(to, global)
    }

    /// Untransformed bounds of `id`.
    ///
    /// A manual [`set_bounds`](Stage::set_bounds) override wins;
    /// otherwise leaves report their content bounds and containers
    /// aggregate the transformed bounds of their visible children.
    /// "Nothing bounded" is `None`, never a zero-size rectangle.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        if let Some(b) = node.bounds_override {
            return Some(b);
        }
        match &node.content {
            Content::Leaf(d) => d.bounds(),
            Content::Container => {
                let mut acc = None;
                for child in &node.children {
                    let child_node = self.node(*child);
                    if !child_node.props.flags.contains(NodeFlags::VISIBLE) {
                        continue;
                    }
                    acc = union_opt(acc, self.transformed_bounds(*child));
                }
                acc
            }
        }
    }

    /// Bounds of `id` mapped through its own transform, i.e. in its
    /// parent's space. Axis-aligned fit: rotation and shear expand.
    pub fn transformed_bounds(&self, id: NodeId) -> Option<Rect> {
        let b = self.bounds(id)?;
        let m = self.node(id).props.matrix();
        Some(transform_rect_bbox(&m, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::{Bitmap, Shape};
    use alloc::boxed::Box;
    use limelight_graphics::ImageHandle;

    fn leaf() -> Content {
        Content::Leaf(Box::new(Shape::new()))
    }

    fn bitmap(w: u32, h: u32) -> Content {
        Content::Leaf(Box::new(Bitmap::new(ImageHandle::new(1, w, h))))
    }

    #[test]
    fn concatenated_matrix_nests_spaces() {
        let mut stage = Stage::new(400.0, 300.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        let child = stage.add_child(group, leaf()).unwrap();
        stage.set_position(group, 100.0, 50.0);
        stage.set_position(child, 10.0, 20.0);

        let p = stage.local_to_global(child, Point::ZERO).unwrap();
        assert_eq!(p, Point::new(110.0, 70.0));
        let back = stage.global_to_local(child, p).unwrap();
        assert!((back - Point::ZERO).hypot() < 1e-9);
    }

    #[test]
    fn concatenation_applies_child_transform_first() {
        let mut stage = Stage::new(400.0, 300.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        let child = stage.add_child(group, leaf()).unwrap();
        stage.props_mut(group).unwrap().rotation = 90.0;
        stage.set_position(child, 10.0, 0.0);

        // Child translates in group space, then the group rotates.
        let p = stage.local_to_global(child, Point::ZERO).unwrap();
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn local_to_local_crosses_branches() {
        let mut stage = Stage::new(400.0, 300.0);
        let a = stage.add_child(stage.root(), Content::Container).unwrap();
        let b = stage.add_child(stage.root(), Content::Container).unwrap();
        stage.set_position(a, 100.0, 0.0);
        stage.set_position(b, 0.0, 100.0);
        let p = stage.local_to_local(a, b, Point::ZERO).unwrap();
        assert!((p - Point::new(100.0, -100.0)).hypot() < 1e-9);
    }

    #[test]
    fn concatenated_props_merge_alpha_and_visibility() {
        let mut stage = Stage::new(400.0, 300.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        let child = stage.add_child(group, leaf()).unwrap();
        stage.props_mut(group).unwrap().alpha = 0.5;
        stage.props_mut(child).unwrap().alpha = 0.5;

        let cp = stage.concatenated_props(child).unwrap();
        assert!((cp.alpha - 0.25).abs() < 1e-12);
        assert!(cp.visible);

        stage.set_visible(group, false);
        assert!(!stage.concatenated_props(child).unwrap().visible);
    }

    #[test]
    fn container_bounds_aggregate_visible_children() {
        let mut stage = Stage::new(400.0, 300.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        let a = stage.add_child(group, bitmap(10, 10)).unwrap();
        let b = stage.add_child(group, bitmap(10, 10)).unwrap();
        stage.set_position(b, 40.0, 40.0);

        assert_eq!(stage.bounds(group), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));

        // Hiding a child drops it from the aggregate.
        stage.set_visible(b, false);
        assert_eq!(stage.bounds(group), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _ = a;
    }

    #[test]
    fn empty_container_bounds_are_none() {
        let mut stage = Stage::new(400.0, 300.0);
        let group = stage.add_child(stage.root(), Content::Container).unwrap();
        assert_eq!(stage.bounds(group), None);
        // A shape with no override is also unbounded.
        let s = stage.add_child(group, leaf()).unwrap();
        assert_eq!(stage.bounds(group), None);
        // A manual override participates.
        stage.set_bounds(s, Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        assert_eq!(stage.bounds(group), Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn transformed_bounds_expand_under_rotation() {
        let mut stage = Stage::new(400.0, 300.0);
        let b = stage.add_child(stage.root(), bitmap(10, 10)).unwrap();
        stage.props_mut(b).unwrap().rotation = 45.0;
        let r = stage.transformed_bounds(b).unwrap();
        let d = 10.0 * core::f64::consts::SQRT_2;
        assert!((r.width() - d).abs() < 1e-9);
        assert!((r.height() - d).abs() < 1e-9);
    }
}
