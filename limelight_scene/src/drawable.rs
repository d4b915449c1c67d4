// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf content: the [`Drawable`] trait and the built-in leaves.

use alloc::string::String;
use core::any::Any;

use kurbo::{Point, Rect};

use limelight_dispatch::EventType;
use limelight_graphics::{Color, Graphics, ImageHandle, Painter};

/// Content a leaf node can render.
///
/// Implementations draw in their own local space with the node's
/// transform already applied. `advance` lets frame-stepped leaves
/// (sprites) move time forward during the tick pass and surface an
/// event for the stage to dispatch at the owning node.
pub trait Drawable: core::fmt::Debug {
    /// Renders the content into `painter`, origin at the local origin.
    fn draw(&self, painter: &mut dyn Painter);

    /// Untransformed content bounds, `None` when unknowable (vector
    /// shapes without an explicit override).
    fn bounds(&self) -> Option<Rect>;

    /// Steps internal animation state by `delta_ms`. A returned event
    /// type is dispatched at-target on the owning node.
    fn advance(&mut self, delta_ms: f64) -> Option<EventType> {
        let _ = delta_ms;
        None
    }

    /// Upcast for downcasting to the concrete leaf type.
    fn as_any(&self) -> &dyn Any;
    /// Mutable variant of [`as_any`](Self::as_any).
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A vector-drawing leaf backed by a [`Graphics`] instruction queue.
#[derive(Debug, Default)]
pub struct Shape {
    /// The instruction queue this shape renders.
    pub graphics: Graphics,
}

impl Shape {
    /// An empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shape wrapping an already-built instruction queue.
    pub fn with_graphics(graphics: Graphics) -> Self {
        Self { graphics }
    }
}

impl Drawable for Shape {
    fn draw(&self, painter: &mut dyn Painter) {
        self.graphics.draw(painter);
    }

    fn bounds(&self) -> Option<Rect> {
        // Vector instruction queues carry no intrinsic bounds; nodes
        // that need them set an explicit override.
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An image leaf, optionally cropped to a source rectangle.
#[derive(Clone, Debug)]
pub struct Bitmap {
    /// The backing image.
    pub image: ImageHandle,
    /// Sub-rectangle of the image to display; `None` shows the whole
    /// image.
    pub source_rect: Option<Rect>,
}

impl Bitmap {
    /// A bitmap showing the whole image.
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            source_rect: None,
        }
    }

    /// A bitmap cropped to `source_rect`.
    pub fn with_source_rect(image: ImageHandle, source_rect: Rect) -> Self {
        Self {
            image,
            source_rect: Some(source_rect),
        }
    }

    fn size(&self) -> (f64, f64) {
        match self.source_rect {
            Some(r) => (r.width(), r.height()),
            None => (f64::from(self.image.width), f64::from(self.image.height)),
        }
    }
}

impl Drawable for Bitmap {
    fn draw(&self, painter: &mut dyn Painter) {
        let (w, h) = self.size();
        painter.draw_image(&self.image, self.source_rect, Rect::new(0.0, 0.0, w, h));
    }

    fn bounds(&self) -> Option<Rect> {
        let (w, h) = self.size();
        Some(Rect::new(0.0, 0.0, w, h))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A single-run text leaf.
///
/// Glyph metrics live in the backend, so bounds (and therefore hit
/// areas) come from the explicit `line_bounds` when set.
#[derive(Clone, Debug)]
pub struct Text {
    /// The string to render.
    pub text: String,
    /// Fill color.
    pub color: Color,
    /// Font size in local units.
    pub size: f64,
    /// Measured bounds of the line, set by the embedder.
    pub line_bounds: Option<Rect>,
}

impl Text {
    /// A text run with no measured bounds yet.
    pub fn new(text: impl Into<String>, size: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            size,
            line_bounds: None,
        }
    }
}

impl Drawable for Text {
    fn draw(&self, painter: &mut dyn Painter) {
        painter.fill_text(&self.text, Point::new(0.0, self.size), self.size, self.color);
    }

    fn bounds(&self) -> Option<Rect> {
        self.line_bounds
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
