// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage: arena storage, tree structure, and event plumbing.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use limelight_dispatch::{
    Dispatcher, Event, EventPayload, EventType, ListenerToken, Phase, propagate,
};
use limelight_graphics::{Graphics, Recording};

use crate::drawable::Drawable;
use crate::filter::Filter;
use crate::pointer::PointerState;
use crate::types::{DisplayProps, NodeFlags, NodeId};

/// What a node holds: children or leaf content.
#[derive(Debug)]
pub enum Content {
    Container,
    Leaf(Box<dyn Drawable>),
}

#[derive(Debug)]
pub(crate) struct CacheState {
    pub(crate) rect: Rect,
    pub(crate) scale: f64,
    pub(crate) recording: Recording,
    pub(crate) cache_id: u64,
    /// Memoized per `cache_id`; cleared on update.
    pub(crate) signature: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) props: DisplayProps,
    pub(crate) content: Content,
    pub(crate) bounds_override: Option<Rect>,
    /// Clip path applied in the parent's coordinate space.
    pub(crate) mask: Option<Graphics>,
    /// Alternate pick geometry; tested as an opaque unit.
    pub(crate) hit_area: Option<NodeId>,
    pub(crate) filters: Vec<Box<dyn Filter>>,
    pub(crate) cache: Option<CacheState>,
    pub(crate) dispatcher: Dispatcher<NodeId>,
    pub(crate) name: Option<String>,
}

impl Node {
    fn new(generation: u32, content: Content) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            props: DisplayProps::default(),
            content,
            bounds_override: None,
            mask: None,
            hit_area: None,
            filters: Vec::new(),
            cache: None,
            dispatcher: Dispatcher::new(),
            name: None,
        }
    }
}

/// The display tree root and owner of every node.
///
/// All structure and state live in a generational arena inside the
/// stage; [`NodeId`] handles are how callers refer to nodes. Stale
/// handles are harmless: every operation on one is a soft no-op.
pub struct Stage {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    width: f64,
    height: f64,
    /// Clear the painter at the start of every update.
    pub auto_clear: bool,
    /// Run the tick pass inside [`update`](Self::update).
    pub tick_on_update: bool,
    /// Keep tracking pointer moves outside the stage bounds.
    pub mouse_move_outside: bool,
    /// Round translations of [`NodeFlags::SNAP_TO_PIXEL`] nodes during
    /// draw.
    pub snap_to_pixel_enabled: bool,
    pub(crate) mouse_over_enabled: bool,
    pub(crate) pointers: BTreeMap<i32, PointerState>,
    /// A stage drawn beneath this one; pointer input is relayed to it
    /// after local processing. Hover state stays per-stage.
    pub next_stage: Option<Box<Stage>>,
    pub(crate) next_cache_id: u64,
}

impl core::fmt::Debug for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Stage")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mouse_over_enabled", &self.mouse_over_enabled)
            .finish_non_exhaustive()
    }
}

impl Stage {
    /// Create a stage of the given size with an empty root container.
    pub fn new(width: f64, height: f64) -> Self {
        let mut stage = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            width,
            height,
            auto_clear: true,
            tick_on_update: true,
            mouse_move_outside: false,
            snap_to_pixel_enabled: false,
            mouse_over_enabled: false,
            pointers: BTreeMap::new(),
            next_stage: None,
            next_cache_id: 1,
        };
        stage.root = stage.alloc(Content::Container);
        stage
    }

    /// The implicit root container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Stage width, in stage coordinates.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Stage height, in stage coordinates.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Resizes the stage rectangle used for pointer bounds checks.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Whether `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    // --- structure ---

    /// Append new content as the last child of `parent`.
    ///
    /// Returns `None` when `parent` is stale or a leaf.
    pub fn add_child(&mut self, parent: NodeId, content: Content) -> Option<NodeId> {
        let index = self.node_opt(parent)?.children.len();
        self.add_child_at(parent, content, index)
    }

    /// Insert new content at `index` among the children of `parent`.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        content: Content,
        index: usize,
    ) -> Option<NodeId> {
        let node = self.node_opt(parent)?;
        if !matches!(node.content, Content::Container) || index > node.children.len() {
            return None;
        }
        let id = self.alloc(content);
        self.node_mut(parent).children.insert(index, id);
        self.node_mut(id).parent = Some(parent);
        self.announce(id, EventType::Added);
        Some(id)
    }

    /// Move an existing node (and its subtree) under `parent`.
    ///
    /// Re-parenting detaches from any prior parent first; a node never
    /// has two parents. Fails for stale ids, leaves-as-parents, the
    /// root, self-adoption, and cycles.
    pub fn adopt(&mut self, parent: NodeId, id: NodeId) -> bool {
        let Some(node) = self.node_opt(parent) else {
            return false;
        };
        let index = node.children.len();
        self.adopt_at(parent, id, index)
    }

    /// Like [`adopt`](Self::adopt), inserting at `index`.
    pub fn adopt_at(&mut self, parent: NodeId, id: NodeId, index: usize) -> bool {
        if !self.is_alive(id) || id == self.root {
            return false;
        }
        let Some(parent_node) = self.node_opt(parent) else {
            return false;
        };
        if !matches!(parent_node.content, Content::Container) {
            return false;
        }
        // Moving within the same parent: the detach below shifts
        // indices, so bound-check against the post-detach length.
        let same_parent = self.node(id).parent == Some(parent);
        let limit = parent_node.children.len() - usize::from(same_parent);
        if index > limit {
            return false;
        }
        // An ancestor (or the node itself) can never become a child of
        // its own subtree.
        if self.contains(id, parent) {
            return false;
        }
        self.detach(id, false);
        self.node_mut(parent).children.insert(index, id);
        self.node_mut(id).parent = Some(parent);
        self.announce(id, EventType::Added);
        true
    }

    /// Detach `id` from its parent. The subtree stays alive and can be
    /// adopted elsewhere.
    pub fn remove_child(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) || id == self.root {
            return false;
        }
        if self.node(id).parent.is_none() {
            return false;
        }
        self.detach(id, true);
        true
    }

    /// Detach the child of `parent` at `index`, returning it.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let id = *self.node_opt(parent)?.children.get(index)?;
        self.detach(id, true);
        Some(id)
    }

    /// Detach every child of `parent`.
    pub fn remove_all_children(&mut self, parent: NodeId) {
        let Some(node) = self.node_opt(parent) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.detach(child, true);
        }
    }

    /// Release `id` and its whole subtree back to the arena.
    ///
    /// Handles into the subtree become stale. The root cannot be
    /// freed.
    pub fn free(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        self.detach(id, true);
        self.free_subtree(id);
    }

    /// Exchange the positions of two children of the same parent.
    pub fn swap_children(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.is_alive(a) || !self.is_alive(b) {
            return false;
        }
        let (Some(pa), Some(pb)) = (self.node(a).parent, self.node(b).parent) else {
            return false;
        };
        if pa != pb {
            return false;
        }
        let children = &mut self.node_mut(pa).children;
        let (Some(ia), Some(ib)) = (
            children.iter().position(|c| *c == a),
            children.iter().position(|c| *c == b),
        ) else {
            return false;
        };
        children.swap(ia, ib);
        true
    }

    /// Move `id` to `index` within its parent's child list.
    pub fn set_child_index(&mut self, id: NodeId, index: usize) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let Some(parent) = self.node(id).parent else {
            return false;
        };
        let children = &mut self.node_mut(parent).children;
        if index >= children.len() {
            return false;
        }
        let Some(from) = children.iter().position(|c| *c == id) else {
            return false;
        };
        children.remove(from);
        children.insert(index, id);
        true
    }

    /// The child of `parent` at `index`, if both exist.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.node_opt(parent)?.children.get(index).copied()
    }

    /// Position of `id` among its siblings.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.node_opt(id)?.parent?;
        self.node(parent).children.iter().position(|c| *c == id)
    }

    /// Number of children of `parent`; `0` for stale ids and leaves.
    pub fn num_children(&self, parent: NodeId) -> usize {
        self.node_opt(parent).map_or(0, |n| n.children.len())
    }

    /// The children of `parent`, front-most last. Empty for stale ids
    /// and leaves.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.node_opt(parent).map_or(&[], |n| n.children.as_slice())
    }

    /// The parent of `id`, `None` for the root, detached nodes, and
    /// stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Whether `id` is `ancestor` or a descendant of it.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(id) {
            return false;
        }
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.node(c).parent;
        }
        false
    }

    // --- properties ---

    /// The display properties of `id`.
    pub fn props(&self, id: NodeId) -> Option<&DisplayProps> {
        self.node_opt(id).map(|n| &n.props)
    }

    /// Mutable access to the display properties of `id`.
    pub fn props_mut(&mut self, id: NodeId) -> Option<&mut DisplayProps> {
        self.node_opt_mut(id).map(|n| &mut n.props)
    }

    /// Moves `id` to `(x, y)` in its parent's coordinates.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.x = x;
            n.props.y = y;
        }
    }

    /// Toggles [`NodeFlags::VISIBLE`] on `id`.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.flags.set(NodeFlags::VISIBLE, visible);
        }
    }

    /// The flags of `id`.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.props.flags)
    }

    /// Replaces the flags of `id` wholesale.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.flags = flags;
        }
    }

    /// Manual bounds override, used by leaves whose content cannot
    /// report bounds (vector shapes, text without metrics).
    pub fn set_bounds(&mut self, id: NodeId, bounds: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.bounds_override = bounds;
        }
    }

    /// Clip mask for `id`, applied in the parent's coordinate space.
    pub fn set_mask(&mut self, id: NodeId, mask: Option<Graphics>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.mask = mask;
        }
    }

    /// Alternate pick geometry for `id`.
    ///
    /// The stage root cannot take a hit area (it is never a pointer
    /// target itself); the call is logged and ignored.
    pub fn set_hit_area(&mut self, id: NodeId, hit_area: Option<NodeId>) {
        if id == self.root {
            log::warn!("hit_area on the stage root is ignored");
            return;
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.hit_area = hit_area;
        }
    }

    /// Filters applied when `id` is cached; they pad the cache region.
    pub fn set_filters(&mut self, id: NodeId, filters: Vec<Box<dyn Filter>>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.filters = filters;
        }
    }

    /// The name of `id`, if one was set.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id)?.name.as_deref()
    }

    /// Names `id` for lookup through [`child_by_name`](Self::child_by_name).
    pub fn set_name(&mut self, id: NodeId, name: Option<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.name = name;
        }
    }

    /// First child of `parent` with the given debug name.
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.name(*c) == Some(name))
    }

    /// Borrow leaf content as a concrete type.
    pub fn leaf_ref<T: Drawable + 'static>(&self, id: NodeId) -> Option<&T> {
        match &self.node_opt(id)?.content {
            Content::Leaf(d) => d.as_any().downcast_ref::<T>(),
            Content::Container => None,
        }
    }

    /// Mutably borrow leaf content as a concrete type.
    pub fn leaf_mut<T: Drawable + 'static>(&mut self, id: NodeId) -> Option<&mut T> {
        match &mut self.node_opt_mut(id)?.content {
            Content::Leaf(d) => d.as_any_mut().downcast_mut::<T>(),
            Content::Container => None,
        }
    }

    // --- listeners & dispatch ---

    /// Register a listener on `id` for events of type `ty`.
    ///
    /// `capture` selects the capture phase; capture listeners never
    /// fire for the at-target delivery.
    pub fn add_listener(
        &self,
        id: NodeId,
        ty: EventType,
        capture: bool,
        f: impl FnMut(&mut Event<NodeId>) + 'static,
    ) -> Option<ListenerToken> {
        Some(self.node_opt(id)?.dispatcher.add_listener(ty, capture, f))
    }

    /// Register a listener removed automatically after its first call.
    pub fn once(
        &self,
        id: NodeId,
        ty: EventType,
        capture: bool,
        f: impl FnMut(&mut Event<NodeId>) + 'static,
    ) -> Option<ListenerToken> {
        Some(self.node_opt(id)?.dispatcher.once(ty, capture, f))
    }

    /// Removes the listener `token` from `id`. Returns whether it was
    /// still registered.
    pub fn remove_listener(&self, id: NodeId, token: ListenerToken) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.dispatcher.remove_listener(token))
    }

    /// Whether `id` has any listener for `ty`, in either phase.
    pub fn has_listener(&self, id: NodeId, ty: EventType) -> bool {
        self.node_opt(id).is_some_and(|n| n.dispatcher.has_listener(ty))
    }

    /// Dispatch `evt` through the full capture / target / bubble
    /// traversal rooted at the stage root.
    pub fn dispatch(&self, target: NodeId, evt: &mut Event<NodeId>) {
        let path = self.path_to_root(target);
        if path.is_empty() {
            return;
        }
        let pairs: Vec<(NodeId, &Dispatcher<NodeId>)> = path
            .iter()
            .map(|id| (*id, &self.node(*id).dispatcher))
            .collect();
        propagate(&pairs, evt);
    }

    /// Deliver `evt` at `target` only, no traversal.
    pub fn dispatch_at(&self, target: NodeId, evt: &mut Event<NodeId>) {
        let Some(node) = self.node_opt(target) else {
            return;
        };
        evt.target = Some(target);
        evt.phase = Phase::AtTarget;
        node.dispatcher.dispatch_to(target, evt);
    }

    /// Synthesize and dispatch an event by type.
    ///
    /// For bubbling types, the parent chain is scanned first and the
    /// event (and its path) is only built when some node on the chain
    /// actually has a bubble-phase listener for `ty`. Non-bubbling
    /// types deliver at-target.
    pub(crate) fn dispatch_by_type(
        &self,
        target: NodeId,
        ty: EventType,
        bubbles: bool,
        payload: EventPayload,
    ) {
        if !self.is_alive(target) {
            return;
        }
        if bubbles {
            let mut cur = Some(target);
            let mut wanted = false;
            while let Some(id) = cur {
                if self.node(id).dispatcher.has_phase_listener(ty, false) {
                    wanted = true;
                    break;
                }
                cur = self.node(id).parent;
            }
            if !wanted {
                return;
            }
            let mut evt = Event::new(ty, true, true).with_payload(payload);
            self.dispatch(target, &mut evt);
        } else {
            if !self.node(target).dispatcher.has_listener(ty) {
                return;
            }
            let mut evt = Event::new(ty, false, false).with_payload(payload);
            self.dispatch_at(target, &mut evt);
        }
    }

    /// Root-first ancestor path, target inclusive.
    pub(crate) fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            out.push(c);
            cur = self.node(c).parent;
        }
        out.reverse();
        out
    }

    // --- internals ---

    fn alloc(&mut self, content: Content) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, content));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, content)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new((self.nodes.len() - 1) as u32, generation)
        }
    }

    /// Unlink `id` from its parent, optionally announcing the removal.
    fn detach(&mut self, id: NodeId, announce: bool) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
        if announce {
            self.announce(id, EventType::Removed);
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn announce(&self, id: NodeId, ty: EventType) {
        let mut evt = Event::new(ty, false, false);
        self.dispatch_at(id, &mut evt);
    }

    /// Access a node whose liveness the caller has established.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        (n.generation == id.1).then_some(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::Shape;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    fn leaf() -> Content {
        Content::Leaf(Box::new(Shape::new()))
    }

    #[test]
    fn add_child_builds_structure() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, Content::Container).unwrap();
        let b = stage.add_child(a, leaf()).unwrap();
        assert_eq!(stage.parent(b), Some(a));
        assert_eq!(stage.children(a), &[b]);
        assert_eq!(stage.num_children(root), 1);
        assert!(stage.contains(root, b));
        assert!(!stage.contains(a, root));
    }

    #[test]
    fn leaves_cannot_have_children() {
        let mut stage = Stage::new(100.0, 100.0);
        let l = stage.add_child(stage.root(), leaf()).unwrap();
        assert!(stage.add_child(l, leaf()).is_none());
        assert!(!stage.adopt(l, stage.root()));
    }

    #[test]
    fn adopt_moves_between_parents() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, Content::Container).unwrap();
        let b = stage.add_child(root, Content::Container).unwrap();
        let child = stage.add_child(a, leaf()).unwrap();

        assert!(stage.adopt(b, child));
        // Single-parent invariant: gone from a, present in b.
        assert_eq!(stage.num_children(a), 0);
        assert_eq!(stage.children(b), &[child]);
        assert_eq!(stage.parent(child), Some(b));
    }

    #[test]
    fn adopt_rejects_cycles_and_root() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, Content::Container).unwrap();
        let b = stage.add_child(a, Content::Container).unwrap();
        assert!(!stage.adopt(b, a), "ancestor under descendant");
        assert!(!stage.adopt(b, b), "self-adoption");
        assert!(!stage.adopt(a, root), "root cannot be re-parented");
        assert_eq!(stage.parent(b), Some(a));
    }

    #[test]
    fn adopt_within_same_parent_reorders() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, leaf()).unwrap();
        let b = stage.add_child(root, leaf()).unwrap();
        let c = stage.add_child(root, leaf()).unwrap();
        assert!(stage.adopt_at(root, c, 0));
        assert_eq!(stage.children(root), &[c, a, b]);
        assert_eq!(stage.num_children(root), 3);
    }

    #[test]
    fn child_index_operations() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, leaf()).unwrap();
        let b = stage.add_child(root, leaf()).unwrap();
        let c = stage.add_child(root, leaf()).unwrap();

        assert_eq!(stage.index_of(b), Some(1));
        assert_eq!(stage.child_at(root, 2), Some(c));
        assert!(stage.swap_children(a, c));
        assert_eq!(stage.children(root), &[c, b, a]);
        assert!(stage.set_child_index(b, 0));
        assert_eq!(stage.children(root), &[b, c, a]);
        // Out of range is a soft no-op.
        assert!(!stage.set_child_index(b, 3));
        assert_eq!(stage.child_at(root, 9), None);
    }

    #[test]
    fn stale_ids_are_soft_no_ops() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, leaf()).unwrap();
        stage.free(a);
        assert!(!stage.is_alive(a));
        assert!(stage.props(a).is_none());
        assert!(!stage.remove_child(a));
        assert!(stage.add_child(a, leaf()).is_none());
        assert_eq!(stage.children(a), &[]);
        stage.set_position(a, 5.0, 5.0);

        // Slot reuse leaves the stale id stale.
        let b = stage.add_child(root, leaf()).unwrap();
        assert!(stage.is_alive(b));
        assert!(!stage.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn removed_child_can_be_readopted() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, Content::Container).unwrap();
        let child = stage.add_child(a, leaf()).unwrap();
        assert!(stage.remove_child(child));
        assert!(stage.is_alive(child), "detach keeps the node alive");
        assert_eq!(stage.parent(child), None);
        assert!(stage.adopt(root, child));
        assert_eq!(stage.parent(child), Some(root));
    }

    #[test]
    fn free_releases_the_whole_subtree() {
        let mut stage = Stage::new(100.0, 100.0);
        let a = stage.add_child(stage.root(), Content::Container).unwrap();
        let b = stage.add_child(a, Content::Container).unwrap();
        let c = stage.add_child(b, leaf()).unwrap();
        stage.free(a);
        assert!(!stage.is_alive(a));
        assert!(!stage.is_alive(b));
        assert!(!stage.is_alive(c));
    }

    #[test]
    fn added_and_removed_events_fire_at_target() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, Content::Container).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        let child = stage.add_child(a, leaf()).unwrap();
        {
            let log = Rc::clone(&log);
            stage.add_listener(child, EventType::Added, false, move |_| {
                log.borrow_mut().push("added");
            });
        }
        {
            let log = Rc::clone(&log);
            stage.add_listener(child, EventType::Removed, false, move |_| {
                log.borrow_mut().push("removed");
            });
        }

        assert!(stage.adopt(root, child));
        assert!(stage.remove_child(child));
        assert_eq!(*log.borrow(), ["added", "removed"]);
    }

    #[test]
    fn root_hit_area_is_ignored() {
        let mut stage = Stage::new(100.0, 100.0);
        let a = stage.add_child(stage.root(), leaf()).unwrap();
        stage.set_hit_area(stage.root(), Some(a));
        assert!(stage.node(stage.root()).hit_area.is_none());
        // Non-root nodes accept one.
        let b = stage.add_child(stage.root(), leaf()).unwrap();
        stage.set_hit_area(b, Some(a));
        assert_eq!(stage.node(b).hit_area, Some(a));
    }

    #[test]
    fn leaf_downcast_roundtrip() {
        let mut stage = Stage::new(100.0, 100.0);
        let id = stage.add_child(stage.root(), leaf()).unwrap();
        assert!(stage.leaf_ref::<Shape>(id).is_some());
        stage
            .leaf_mut::<Shape>(id)
            .unwrap()
            .graphics
            .rect(0.0, 0.0, 4.0, 4.0);
        assert!(!stage.leaf_ref::<Shape>(id).unwrap().graphics.is_empty());
    }

    #[test]
    fn bubbling_dispatch_walks_the_tree() {
        let mut stage = Stage::new(100.0, 100.0);
        let root = stage.root();
        let a = stage.add_child(root, Content::Container).unwrap();
        let b = stage.add_child(a, leaf()).unwrap();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (label, id, capture) in [("root-cap", root, true), ("b", b, false), ("a", a, false)] {
            let order = Rc::clone(&order);
            stage.add_listener(id, EventType::Click, capture, move |_| {
                order.borrow_mut().push(label);
            });
        }
        stage.dispatch_by_type(b, EventType::Click, true, EventPayload::None);
        assert_eq!(*order.borrow(), ["root-cap", "b", "a"]);
    }

    #[test]
    fn bubbling_synthesis_skips_without_bubble_listeners() {
        let mut stage = Stage::new(100.0, 100.0);
        let a = stage.add_child(stage.root(), leaf()).unwrap();
        let fired = Rc::new(RefCell::new(0));
        {
            let fired = Rc::clone(&fired);
            // Capture-only listener: the pre-scan looks for bubble
            // listeners and finds none, so nothing is dispatched.
            stage.add_listener(stage.root(), EventType::Click, true, move |_| {
                *fired.borrow_mut() += 1;
            });
        }
        stage.dispatch_by_type(a, EventType::Click, true, EventPayload::None);
        assert_eq!(*fired.borrow(), 0);
    }
}
