// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-point coverage probing.
//!
//! [`PixelProbe`] is a [`Painter`] that rasterizes nothing: it answers
//! whether any draw call would deposit non-negligible alpha on one
//! fixed point. Hit testing replays a display object's drawing through
//! a probe positioned at the query point, which makes hits
//! shape-accurate rather than bounds-accurate.

use alloc::vec::Vec;

use kurbo::{Affine, Arc as KurboArc, BezPath, Cap, Join, Point, Rect, Shape, Vec2};

use limelight_geom::Matrix2D;

use crate::painter::Painter;
use crate::style::{
    Color, CompositeOperation, ImageHandle, LineCap, LineJoin, Paint, Shadow, StrokeStyle,
};

#[cfg(feature = "std")]
mod num {
    pub(super) fn cos(x: f64) -> f64 {
        x.cos()
    }
    pub(super) fn sin(x: f64) -> f64 {
        x.sin()
    }
    pub(super) fn sqrt(x: f64) -> f64 {
        x.sqrt()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod num {
    pub(super) fn cos(x: f64) -> f64 {
        libm::cos(x)
    }
    pub(super) fn sin(x: f64) -> f64 {
        libm::sin(x)
    }
    pub(super) fn sqrt(x: f64) -> f64 {
        libm::sqrt(x)
    }
}

/// Coverage below this alpha does not register a hit, matching a
/// `u8 > 1` readback threshold.
const ALPHA_THRESHOLD: f64 = 1.0 / 255.0;

/// Curve flattening tolerance for arcs and stroke expansion.
const TOLERANCE: f64 = 0.1;

const TAU: f64 = core::f64::consts::TAU;

#[derive(Clone, Debug)]
struct State {
    tf: Matrix2D,
    alpha: f64,
    fill: Option<Paint>,
    stroke: Option<Paint>,
    stroke_style: StrokeStyle,
    /// Active clip paths, already in probe space. All must contain
    /// the probe point for a draw to count.
    clips: Vec<BezPath>,
}

impl State {
    fn new() -> Self {
        Self {
            tf: Matrix2D::IDENTITY,
            alpha: 1.0,
            fill: None,
            stroke: None,
            stroke_style: StrokeStyle::default(),
            clips: Vec::new(),
        }
    }
}

/// A painter that tests whether drawing covers one point.
///
/// The probe point is fixed at construction, in the space the replay
/// starts in (stage space for tree hit tests). Dashing, shadows, and
/// composite modes are ignored: dashed strokes count as solid and
/// nothing un-deposits coverage.
#[derive(Debug)]
pub struct PixelProbe {
    probe: Point,
    hit: bool,
    state: State,
    stack: Vec<State>,
    /// Current path, accumulated in probe space.
    path: BezPath,
    has_current: bool,
}

impl PixelProbe {
    /// A probe aimed at `probe` in the replay's starting space.
    pub fn new(probe: Point) -> Self {
        Self {
            probe,
            hit: false,
            state: State::new(),
            stack: Vec::new(),
            path: BezPath::new(),
            has_current: false,
        }
    }

    /// Whether any draw so far covered the probe point.
    pub fn hit(&self) -> bool {
        self.hit
    }

    fn map(&self, p: Point) -> Point {
        self.state.tf.transform_point(p.x, p.y)
    }

    fn clipped_out(&self) -> bool {
        self.state.clips.iter().any(|c| !c.contains(self.probe))
    }

    fn register(&mut self, paint_alpha: f64, covered: bool) {
        if covered && self.state.alpha * paint_alpha > ALPHA_THRESHOLD && !self.clipped_out() {
            self.hit = true;
        }
    }

    /// Canvas semantics: path verbs with no current point start a new
    /// sub-path instead.
    fn extend_or_move(&mut self, p: Point, f: impl FnOnce(&mut BezPath, Point)) {
        let mapped = self.map(p);
        if self.has_current {
            f(&mut self.path, mapped);
        } else {
            self.path.move_to(mapped);
            self.has_current = true;
        }
    }
}

impl Painter for PixelProbe {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    fn transform(&mut self, m: &Matrix2D) {
        self.state.tf.append_matrix(m);
    }

    fn multiply_alpha(&mut self, alpha: f64) {
        self.state.alpha *= alpha;
    }

    fn set_composite(&mut self, _op: CompositeOperation) {}

    fn set_shadow(&mut self, _shadow: Option<&Shadow>) {}

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.has_current = false;
    }

    fn move_to(&mut self, p: Point) {
        let mapped = self.map(p);
        self.path.move_to(mapped);
        self.has_current = true;
    }

    fn line_to(&mut self, p: Point) {
        self.extend_or_move(p, |path, to| path.line_to(to));
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        let c = self.map(ctrl);
        self.extend_or_move(to, |path, to| path.quad_to(c, to));
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        let c1 = self.map(c1);
        let c2 = self.map(c2);
        self.extend_or_move(to, |path, to| path.curve_to(c1, c2, to));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, ccw: bool) {
        let mut sweep = end_angle - start_angle;
        if ccw {
            while sweep > 0.0 {
                sweep -= TAU;
            }
            sweep = sweep.max(-TAU);
        } else {
            while sweep < 0.0 {
                sweep += TAU;
            }
            sweep = sweep.min(TAU);
        }
        let start = Point::new(
            center.x + radius * num::cos(start_angle),
            center.y + radius * num::sin(start_angle),
        );
        if self.has_current {
            let mapped = self.map(start);
            self.path.line_to(mapped);
        } else {
            let mapped = self.map(start);
            self.path.move_to(mapped);
            self.has_current = true;
        }
        let arc = KurboArc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        let a: Affine = self.state.tf.into();
        for el in arc.append_iter(TOLERANCE) {
            self.path.push(a * el);
        }
    }

    fn rect_path(&mut self, rect: Rect) {
        self.path.move_to(self.map(Point::new(rect.x0, rect.y0)));
        self.path.line_to(self.map(Point::new(rect.x1, rect.y0)));
        self.path.line_to(self.map(Point::new(rect.x1, rect.y1)));
        self.path.line_to(self.map(Point::new(rect.x0, rect.y1)));
        self.path.close_path();
        self.has_current = true;
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn set_fill_paint(&mut self, paint: Option<&Paint>) {
        self.state.fill = paint.cloned();
    }

    fn set_stroke_paint(&mut self, paint: Option<&Paint>) {
        self.state.stroke = paint.cloned();
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        self.state.stroke_style = style.clone();
    }

    fn set_stroke_dash(&mut self, _pattern: &[f64], _offset: f64) {}

    fn fill(&mut self) {
        let Some(paint) = self.state.fill.clone() else {
            return;
        };
        let covered = self.path.contains(self.probe);
        self.register(paint.max_alpha(), covered);
    }

    fn stroke(&mut self) {
        let Some(paint) = self.state.stroke.clone() else {
            return;
        };
        let style = &self.state.stroke_style;
        // The path is already in probe space, so the pen width has to
        // be scaled the same way unless the style opts out.
        let m = &self.state.tf;
        let scale = if style.ignore_scale {
            1.0
        } else {
            num::sqrt((m.a * m.d - m.b * m.c).abs())
        };
        let width = style.width * scale;
        if width <= 0.0 {
            return;
        }
        let pen = kurbo::Stroke::new(width)
            .with_caps(match style.cap {
                LineCap::Butt => Cap::Butt,
                LineCap::Round => Cap::Round,
                LineCap::Square => Cap::Square,
            })
            .with_join(match style.join {
                LineJoin::Miter => Join::Miter,
                LineJoin::Round => Join::Round,
                LineJoin::Bevel => Join::Bevel,
            })
            .with_miter_limit(style.miter_limit);
        let outline = kurbo::stroke(
            self.path.iter(),
            &pen,
            &kurbo::StrokeOpts::default(),
            TOLERANCE,
        );
        let covered = outline.contains(self.probe);
        self.register(paint.max_alpha(), covered);
    }

    fn clip(&mut self) {
        self.state.clips.push(self.path.clone());
    }

    fn draw_image(&mut self, _image: &ImageHandle, _src: Option<Rect>, dest: Rect) {
        // Images count as opaque over their destination quad.
        let mut quad = BezPath::new();
        quad.move_to(self.map(Point::new(dest.x0, dest.y0)));
        quad.line_to(self.map(Point::new(dest.x1, dest.y0)));
        quad.line_to(self.map(Point::new(dest.x1, dest.y1)));
        quad.line_to(self.map(Point::new(dest.x0, dest.y1)));
        quad.close_path();
        let covered = quad.contains(self.probe);
        self.register(1.0, covered);
    }

    fn fill_text(&mut self, _text: &str, _origin: Point, _size: f64, _color: Color) {
        // No glyph metrics here. Text hit areas come from explicit
        // bounds at the display-object level.
    }

    fn clear(&mut self) {}
}
