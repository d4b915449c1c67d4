// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering boundary.
//!
//! Everything the display tree draws goes through [`Painter`], a
//! canvas-shaped trait the embedding implements once per backend. The
//! toolkit itself ships two implementations: [`Recorder`] for cached
//! sub-trees and [`PixelProbe`] for hit testing.
//!
//! [`Recorder`]: crate::Recorder
//! [`PixelProbe`]: crate::PixelProbe

use kurbo::{Point, Rect};

use limelight_geom::Matrix2D;

use crate::style::{
    Color, CompositeOperation, ImageHandle, Paint, Shadow, StrokeStyle,
};

/// A canvas-style immediate painting surface.
///
/// Methods mirror the 2D context model: an implicit current path,
/// style state realized by [`fill`](Self::fill) and
/// [`stroke`](Self::stroke), and a save/restore stack covering the
/// transform, clip, alpha, shadow, and composite state.
///
/// Every `save` performed by the display tree is paired with exactly
/// one `restore`, so implementations may keep state in a plain stack.
pub trait Painter {
    /// Pushes the current transform, clip, and style state.
    fn save(&mut self);
    /// Pops the state pushed by the matching [`save`](Self::save).
    fn restore(&mut self);

    /// Multiplies `m` onto the current transform (local space is
    /// appended, matching display-object nesting).
    fn transform(&mut self, m: &Matrix2D);
    /// Multiplies the current global alpha by `alpha`.
    fn multiply_alpha(&mut self, alpha: f64);
    fn set_composite(&mut self, op: CompositeOperation);
    fn set_shadow(&mut self, shadow: Option<&Shadow>);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, to: Point);
    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point);
    /// Canvas `arc`: when the current path is non-empty, a straight
    /// segment connects the current point to the arc start.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, ccw: bool);
    /// Appends `rect` as a closed sub-path.
    fn rect_path(&mut self, rect: Rect);
    fn close_path(&mut self);

    fn set_fill_paint(&mut self, paint: Option<&Paint>);
    fn set_stroke_paint(&mut self, paint: Option<&Paint>);
    fn set_stroke_style(&mut self, style: &StrokeStyle);
    fn set_stroke_dash(&mut self, pattern: &[f64], offset: f64);

    /// Fills the current path with the current fill paint (nonzero
    /// winding). A `None` fill paint is a no-op.
    fn fill(&mut self);
    /// Strokes the current path with the current stroke paint and pen.
    fn stroke(&mut self);
    /// Intersects the clip region with the current path.
    fn clip(&mut self);

    /// Draws `src` (or the whole image when `None`) into `dest`, both
    /// in the current local space.
    fn draw_image(&mut self, image: &ImageHandle, src: Option<Rect>, dest: Rect);
    /// Draws `text` with its baseline origin at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, size: f64, color: Color);

    /// Clears the whole surface. Only the stage's auto-clear pass
    /// calls this.
    fn clear(&mut self);
}
