// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sub-tree caching.
//!
//! A cached node's content is captured once into a [`Recording`] and
//! replayed on every subsequent draw and hit probe. The capture is
//! deliberately stale: content edits under a cached node stay invisible
//! until [`update_cache`](Stage::update_cache) re-captures, which is
//! what makes caching a rendering optimization rather than a mirror.
//!
//! [`Recording`]: limelight_graphics::Recording

use alloc::format;
use alloc::string::String;
use kurbo::Rect;
use limelight_graphics::Recorder;

use crate::draw::DrawPass;
use crate::stage::{CacheState, Stage};
use crate::types::NodeId;

impl Stage {
    /// Capture the node's content into a cache covering `rect` (in the
    /// node's local space) at the given resolution `scale`.
    ///
    /// The rectangle grows by the padding of any attached filters so
    /// their spill is not clipped. Calling `cache` again re-captures
    /// and replaces the previous cache.
    pub fn cache(&mut self, id: NodeId, rect: Rect, scale: f64) {
        if !self.is_alive(id) {
            return;
        }
        let padded = self
            .node(id)
            .filters
            .iter()
            .fold(rect, |r, f| r + f.padding());
        let recording = self.capture(id);
        let cache_id = self.next_cache_id;
        self.next_cache_id += 1;
        self.node_mut(id).cache = Some(CacheState {
            rect: padded,
            scale,
            recording,
            cache_id,
            signature: None,
        });
    }

    /// Re-capture a cached node's content, keeping its rectangle and
    /// scale.
    ///
    /// # Panics
    ///
    /// Panics when the node has never been cached, matching the
    /// contract that `cache` defines the region before updates refresh
    /// it. Dead ids are ignored.
    pub fn update_cache(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        assert!(
            self.node(id).cache.is_some(),
            "cache(): call cache() before update_cache()"
        );
        let recording = self.capture(id);
        let cache_id = self.next_cache_id;
        self.next_cache_id += 1;
        let cache = self
            .node_mut(id)
            .cache
            .as_mut()
            .expect("cache checked above");
        cache.recording = recording;
        cache.cache_id = cache_id;
        cache.signature = None;
    }

    /// Drop the node's cache; drawing and picking see live content
    /// again.
    pub fn uncache(&mut self, id: NodeId) {
        if let Some(node) = self.node_opt_mut(id) {
            node.cache = None;
        }
    }

    /// Whether `id` currently holds a cache capture.
    pub fn is_cached(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.cache.is_some())
    }

    /// The cached region in local space, padded by filters.
    pub fn cache_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id)?.cache.as_ref().map(|c| c.rect)
    }

    /// A string that changes on every capture, usable as a texture key
    /// by embeddings that upload caches to a backend.
    ///
    /// Memoized per capture; repeated calls return the same string
    /// until the next [`cache`](Stage::cache) or
    /// [`update_cache`](Stage::update_cache).
    pub fn cache_signature(&mut self, id: NodeId) -> Option<String> {
        if !self.is_alive(id) {
            return None;
        }
        let slot = id.idx();
        let generation = id.1;
        let cache = self.node_mut(id).cache.as_mut()?;
        if cache.signature.is_none() {
            cache.signature = Some(format!(
                "cache-{slot}-{generation}-{}",
                cache.cache_id
            ));
        }
        cache.signature.clone()
    }

    /// Record the node's live content, bypassing its own cache so a
    /// re-capture never replays itself.
    fn capture(&mut self, id: NodeId) -> limelight_graphics::Recording {
        let mut recorder = Recorder::new();
        self.draw_content(id, &mut recorder, &DrawPass::default(), true);
        recorder.finish()
    }
}
