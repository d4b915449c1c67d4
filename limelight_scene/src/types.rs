// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the display tree: node identifiers, flags, and
//! display properties.

use limelight_geom::Matrix2D;
use limelight_graphics::{CompositeOperation, Shadow};

/// Identifier for a node in the display tree.
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to
///   that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Stage::is_alive`](crate::Stage::is_alive) to check whether a
/// `NodeId` still refers to a live node. Stale ids never alias a
/// different live node because the generation must match, and every
/// stage operation on a stale id is a soft no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling rendering and pointer interaction.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is drawn and contributes to container bounds.
        const VISIBLE        = 0b0000_0001;
        /// Node can be a pointer-event target.
        const MOUSE_ENABLED  = 0b0000_0010;
        /// Container children are individually targetable; without
        /// this, descendant hits target the container itself.
        const MOUSE_CHILDREN = 0b0000_0100;
        /// Round this node's translation to whole pixels when the
        /// draw pass has snapping enabled.
        const SNAP_TO_PIXEL  = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::MOUSE_ENABLED | Self::MOUSE_CHILDREN
    }
}

/// Canvas-style display properties of one node.
///
/// [`matrix`](Self::matrix) composes them into the node's local
/// transform; the registration point offsets both rendering and the
/// rotation/scale origin.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayProps {
    /// Horizontal position, in the parent's coordinates.
    pub x: f64,
    /// Vertical position, in the parent's coordinates.
    pub y: f64,
    /// Registration point x, in the node's own coordinates.
    pub reg_x: f64,
    /// Registration point y, in the node's own coordinates.
    pub reg_y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Opacity in `[0, 1]`, multiplied down the tree.
    pub alpha: f64,
    /// Blend mode; `None` inherits the parent's.
    pub composite: Option<CompositeOperation>,
    /// Drop shadow applied to this node's rendering, if any.
    pub shadow: Option<Shadow>,
    /// Rendering and interaction flags.
    pub flags: NodeFlags,
}

impl Default for DisplayProps {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            reg_x: 0.0,
            reg_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            alpha: 1.0,
            composite: None,
            shadow: None,
            flags: NodeFlags::default(),
        }
    }
}

impl DisplayProps {
    /// The local transform these properties describe.
    pub fn matrix(&self) -> Matrix2D {
        let mut m = Matrix2D::IDENTITY;
        m.append_transform(
            self.x,
            self.y,
            self.scale_x,
            self.scale_y,
            self.rotation,
            self.skew_x,
            self.skew_y,
            self.reg_x,
            self.reg_y,
        );
        m
    }
}

/// Accumulated render state of a node and all its ancestors.
#[derive(Clone, Debug)]
pub struct ConcatProps {
    /// Concatenated transform, root space to node space.
    pub matrix: Matrix2D,
    /// Product of ancestor alphas.
    pub alpha: f64,
    /// Nearest explicit shadow up the chain, if any.
    pub shadow: Option<Shadow>,
    /// Nearest explicit composite operation up the chain, if any.
    pub composite: Option<CompositeOperation>,
    /// False if any node on the chain is invisible or fully
    /// transparent.
    pub visible: bool,
}

/// What a pick should consider targetable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickMode {
    /// Every visible node with coverage, regardless of interaction
    /// flags.
    All,
    /// Pointer-dispatch semantics: [`NodeFlags::MOUSE_ENABLED`] and
    /// [`NodeFlags::MOUSE_CHILDREN`] apply.
    Pointer {
        /// Additionally require a pointer listener on the node or an
        /// ancestor, the cheap pre-filter used by hover tracking.
        require_listener: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_interactive_and_visible() {
        let f = NodeFlags::default();
        assert!(f.contains(NodeFlags::VISIBLE));
        assert!(f.contains(NodeFlags::MOUSE_ENABLED));
        assert!(f.contains(NodeFlags::MOUSE_CHILDREN));
        assert!(!f.contains(NodeFlags::SNAP_TO_PIXEL));
    }

    #[test]
    fn props_matrix_honors_registration() {
        let props = DisplayProps {
            x: 10.0,
            y: 20.0,
            reg_x: 5.0,
            reg_y: 5.0,
            ..Default::default()
        };
        let p = props.matrix().transform_point(5.0, 5.0);
        // The registration point lands exactly on (x, y).
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y - 20.0).abs() < 1e-12);
    }
}
