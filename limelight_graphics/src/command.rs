// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The instruction vocabulary of the deferred drawing queue.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::painter::Painter;
use crate::style::{Paint, StrokeStyle};

/// One deferred drawing instruction.
///
/// Path instructions extend the current path; the remaining
/// instructions change style state or realize the current path as a
/// fill or stroke. [`Command::is_path`] distinguishes the two, which
/// is what mask and clip replay rely on.
#[derive(Clone, Debug, PartialEq)]
#[allow(
    missing_docs,
    reason = "variants mirror the `Graphics` builder calls one-to-one"
)]
pub enum Command {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic curve to `to` with control point `ctrl`.
    QuadTo { ctrl: Point, to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
    /// Circular arc around `center`, canvas semantics: a line connects
    /// the current point to the arc start when the path is non-empty.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    },
    Rect(Rect),
    RoundRect {
        rect: Rect,
        radius: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Ellipse(Rect),
    ClosePath,
    SetFill(Option<Paint>),
    SetStroke(Option<Paint>),
    SetStrokeStyle(StrokeStyle),
    SetStrokeDash {
        pattern: Vec<f64>,
        offset: f64,
    },
    Fill,
    Stroke,
}

/// Bezier circle constant: control-point offset for a quarter arc.
const KAPPA: f64 = 0.552_284_749_830_793_4;

impl Command {
    /// Whether this instruction contributes path geometry rather than
    /// style or realization.
    pub fn is_path(&self) -> bool {
        matches!(
            self,
            Self::BeginPath
                | Self::MoveTo(_)
                | Self::LineTo(_)
                | Self::QuadTo { .. }
                | Self::CubicTo { .. }
                | Self::Arc { .. }
                | Self::Rect(_)
                | Self::RoundRect { .. }
                | Self::Circle { .. }
                | Self::Ellipse(_)
                | Self::ClosePath
        )
    }

    /// Replays this instruction onto `painter`.
    ///
    /// Compound shapes (rounded rects, circles, ellipses) are expanded
    /// into primitive path calls here so painters only need the canvas
    /// path vocabulary.
    pub fn execute(&self, painter: &mut dyn Painter) {
        match self {
            Self::BeginPath => painter.begin_path(),
            Self::MoveTo(p) => painter.move_to(*p),
            Self::LineTo(p) => painter.line_to(*p),
            Self::QuadTo { ctrl, to } => painter.quad_to(*ctrl, *to),
            Self::CubicTo { c1, c2, to } => painter.cubic_to(*c1, *c2, *to),
            Self::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                ccw,
            } => painter.arc(*center, *radius, *start_angle, *end_angle, *ccw),
            Self::Rect(r) => painter.rect_path(*r),
            Self::RoundRect { rect, radius } => round_rect_path(painter, *rect, *radius),
            Self::Circle { center, radius } => ellipse_path(
                painter,
                Rect::new(
                    center.x - radius,
                    center.y - radius,
                    center.x + radius,
                    center.y + radius,
                ),
            ),
            Self::Ellipse(r) => ellipse_path(painter, *r),
            Self::ClosePath => painter.close_path(),
            Self::SetFill(p) => painter.set_fill_paint(p.as_ref()),
            Self::SetStroke(p) => painter.set_stroke_paint(p.as_ref()),
            Self::SetStrokeStyle(s) => painter.set_stroke_style(s),
            Self::SetStrokeDash { pattern, offset } => painter.set_stroke_dash(pattern, *offset),
            Self::Fill => painter.fill(),
            Self::Stroke => painter.stroke(),
        }
    }
}

fn round_rect_path(painter: &mut dyn Painter, rect: Rect, radius: f64) {
    let r = radius
        .min(rect.width() / 2.0)
        .min(rect.height() / 2.0)
        .max(0.0);
    if r == 0.0 {
        painter.rect_path(rect);
        return;
    }
    let k = r * (1.0 - KAPPA);
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
    painter.move_to(Point::new(x0 + r, y0));
    painter.line_to(Point::new(x1 - r, y0));
    painter.cubic_to(
        Point::new(x1 - k, y0),
        Point::new(x1, y0 + k),
        Point::new(x1, y0 + r),
    );
    painter.line_to(Point::new(x1, y1 - r));
    painter.cubic_to(
        Point::new(x1, y1 - k),
        Point::new(x1 - k, y1),
        Point::new(x1 - r, y1),
    );
    painter.line_to(Point::new(x0 + r, y1));
    painter.cubic_to(
        Point::new(x0 + k, y1),
        Point::new(x0, y1 - k),
        Point::new(x0, y1 - r),
    );
    painter.line_to(Point::new(x0, y0 + r));
    painter.cubic_to(
        Point::new(x0, y0 + k),
        Point::new(x0 + k, y0),
        Point::new(x0 + r, y0),
    );
    painter.close_path();
}

fn ellipse_path(painter: &mut dyn Painter, rect: Rect) {
    let cx = rect.center().x;
    let cy = rect.center().y;
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;
    painter.move_to(Point::new(cx + rx, cy));
    painter.cubic_to(
        Point::new(cx + rx, cy + ky),
        Point::new(cx + kx, cy + ry),
        Point::new(cx, cy + ry),
    );
    painter.cubic_to(
        Point::new(cx - kx, cy + ry),
        Point::new(cx - rx, cy + ky),
        Point::new(cx - rx, cy),
    );
    painter.cubic_to(
        Point::new(cx - rx, cy - ky),
        Point::new(cx - kx, cy - ry),
        Point::new(cx, cy - ry),
    );
    painter.cubic_to(
        Point::new(cx + kx, cy - ry),
        Point::new(cx + rx, cy - ky),
        Point::new(cx + rx, cy),
    );
    painter.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use alloc::vec;

    #[test]
    fn path_classification() {
        assert!(Command::MoveTo(Point::ZERO).is_path());
        assert!(Command::ClosePath.is_path());
        assert!(
            Command::Circle {
                center: Point::ZERO,
                radius: 1.0
            }
            .is_path()
        );
        assert!(!Command::Fill.is_path());
        assert!(!Command::SetFill(Some(Paint::Solid(Color::BLACK))).is_path());
        assert!(
            !Command::SetStrokeDash {
                pattern: vec![4.0, 2.0],
                offset: 0.0
            }
            .is_path()
        );
    }
}
