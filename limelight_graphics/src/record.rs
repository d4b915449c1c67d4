// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replayable painter recordings.
//!
//! A [`Recorder`] captures every painter call into an owned op list; a
//! [`Recording`] replays that list against any other painter later.
//! Sub-tree caching draws a branch once into a recording and replays
//! it on subsequent frames until invalidated.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use limelight_geom::Matrix2D;

use crate::painter::Painter;
use crate::style::{
    Color, CompositeOperation, ImageHandle, Paint, Shadow, StrokeStyle,
};

/// One captured painter call.
#[derive(Clone, Debug, PartialEq)]
#[allow(
    missing_docs,
    reason = "variants mirror `Painter` methods one-to-one"
)]
pub enum Op {
    Save,
    Restore,
    Transform(Matrix2D),
    MultiplyAlpha(f64),
    SetComposite(CompositeOperation),
    SetShadow(Option<Shadow>),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    },
    RectPath(Rect),
    ClosePath,
    SetFillPaint(Option<Paint>),
    SetStrokePaint(Option<Paint>),
    SetStrokeStyle(StrokeStyle),
    SetStrokeDash { pattern: Vec<f64>, offset: f64 },
    Fill,
    Stroke,
    Clip,
    DrawImage {
        image: ImageHandle,
        src: Option<Rect>,
        dest: Rect,
    },
    FillText {
        text: String,
        origin: Point,
        size: f64,
        color: Color,
    },
    Clear,
}

/// An immutable, replayable sequence of painter calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recording {
    ops: Vec<Op>,
}

impl Recording {
    /// The captured calls, in capture order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of captured calls.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Replays the captured calls onto `painter` in order.
    pub fn replay(&self, painter: &mut dyn Painter) {
        for op in &self.ops {
            match op {
                Op::Save => painter.save(),
                Op::Restore => painter.restore(),
                Op::Transform(m) => painter.transform(m),
                Op::MultiplyAlpha(a) => painter.multiply_alpha(*a),
                Op::SetComposite(c) => painter.set_composite(*c),
                Op::SetShadow(s) => painter.set_shadow(s.as_ref()),
                Op::BeginPath => painter.begin_path(),
                Op::MoveTo(p) => painter.move_to(*p),
                Op::LineTo(p) => painter.line_to(*p),
                Op::QuadTo { ctrl, to } => painter.quad_to(*ctrl, *to),
                Op::CubicTo { c1, c2, to } => painter.cubic_to(*c1, *c2, *to),
                Op::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    ccw,
                } => painter.arc(*center, *radius, *start_angle, *end_angle, *ccw),
                Op::RectPath(r) => painter.rect_path(*r),
                Op::ClosePath => painter.close_path(),
                Op::SetFillPaint(p) => painter.set_fill_paint(p.as_ref()),
                Op::SetStrokePaint(p) => painter.set_stroke_paint(p.as_ref()),
                Op::SetStrokeStyle(s) => painter.set_stroke_style(s),
                Op::SetStrokeDash { pattern, offset } => {
                    painter.set_stroke_dash(pattern, *offset);
                }
                Op::Fill => painter.fill(),
                Op::Stroke => painter.stroke(),
                Op::Clip => painter.clip(),
                Op::DrawImage { image, src, dest } => painter.draw_image(image, *src, *dest),
                Op::FillText {
                    text,
                    origin,
                    size,
                    color,
                } => painter.fill_text(text, *origin, *size, *color),
                Op::Clear => painter.clear(),
            }
        }
    }
}

/// A painter that captures calls instead of rasterizing.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    ops: Vec<Op>,
}

impl Recorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the recorder, yielding the captured recording.
    pub fn finish(self) -> Recording {
        Recording { ops: self.ops }
    }
}

impl Painter for Recorder {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn transform(&mut self, m: &Matrix2D) {
        self.ops.push(Op::Transform(*m));
    }

    fn multiply_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::MultiplyAlpha(alpha));
    }

    fn set_composite(&mut self, op: CompositeOperation) {
        self.ops.push(Op::SetComposite(op));
    }

    fn set_shadow(&mut self, shadow: Option<&Shadow>) {
        self.ops.push(Op::SetShadow(shadow.cloned()));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(Op::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(Op::LineTo(p));
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.ops.push(Op::QuadTo { ctrl, to });
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.ops.push(Op::CubicTo { c1, c2, to });
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, ccw: bool) {
        self.ops.push(Op::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            ccw,
        });
    }

    fn rect_path(&mut self, rect: Rect) {
        self.ops.push(Op::RectPath(rect));
    }

    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }

    fn set_fill_paint(&mut self, paint: Option<&Paint>) {
        self.ops.push(Op::SetFillPaint(paint.cloned()));
    }

    fn set_stroke_paint(&mut self, paint: Option<&Paint>) {
        self.ops.push(Op::SetStrokePaint(paint.cloned()));
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        self.ops.push(Op::SetStrokeStyle(style.clone()));
    }

    fn set_stroke_dash(&mut self, pattern: &[f64], offset: f64) {
        self.ops.push(Op::SetStrokeDash {
            pattern: pattern.to_vec(),
            offset,
        });
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }

    fn clip(&mut self) {
        self.ops.push(Op::Clip);
    }

    fn draw_image(&mut self, image: &ImageHandle, src: Option<Rect>, dest: Rect) {
        self.ops.push(Op::DrawImage {
            image: *image,
            src,
            dest,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, size: f64, color: Color) {
        self.ops.push(Op::FillText {
            text: String::from(text),
            origin,
            size,
            color,
        });
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graphics;
    use crate::style::Paint;

    #[test]
    fn replay_reproduces_the_capture() {
        let mut g = Graphics::new();
        g.begin_fill(Paint::Solid(Color::rgb(10, 20, 30)))
            .move_to(0.0, 0.0)
            .line_to(5.0, 5.0)
            .close_path();

        let mut first = Recorder::new();
        g.draw(&mut first);
        let recording = first.finish();

        let mut second = Recorder::new();
        recording.replay(&mut second);
        assert_eq!(second.finish(), recording);
    }

    #[test]
    fn state_ops_are_captured_verbatim() {
        let mut rec = Recorder::new();
        rec.save();
        rec.transform(&Matrix2D::IDENTITY);
        rec.multiply_alpha(0.5);
        rec.restore();
        let r = rec.finish();
        assert_eq!(
            r.ops(),
            [
                Op::Save,
                Op::Transform(Matrix2D::IDENTITY),
                Op::MultiplyAlpha(0.5),
                Op::Restore,
            ]
        );
    }
}
