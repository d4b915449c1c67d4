// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The deferred drawing queue.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::command::Command;
use crate::decode::{self, PathDecodeError};
use crate::painter::Painter;
use crate::style::{Paint, StrokeStyle};

/// A retained queue of drawing instructions, built through chained
/// calls and replayed against a [`Painter`] on every draw.
///
/// Path calls accumulate into an active sub-path. Style calls
/// (`begin_fill`, `begin_stroke`, `set_stroke_style`, and friends) end
/// the active sub-path: its instructions are committed together with
/// the styles in effect at that moment, and later style changes no
/// longer affect it. Replay is cached and rebuilt lazily after any
/// mutation.
#[derive(Clone, Debug, Default)]
pub struct Graphics {
    /// Fully committed sub-paths, styles interleaved.
    committed: Vec<Command>,
    /// Path instructions of the sub-path still being built.
    active: Vec<Command>,
    fill: Option<Paint>,
    stroke: Option<Paint>,
    stroke_style: Option<StrokeStyle>,
    stroke_dash: Option<(Vec<f64>, f64)>,
    /// Lazily rebuilt flattened instruction list.
    baked: Vec<Command>,
    dirty: bool,
}

impl Graphics {
    /// An empty queue with no styles set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no path instructions have been queued.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && !self.committed.iter().any(Command::is_path)
    }

    /// Discards all instructions and styles.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Starts a new contour at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(Command::MoveTo(Point::new(x, y)))
    }

    /// Line to `(x, y)`. On an empty path this acts as a `move_to`.
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(Command::LineTo(Point::new(x, y)))
    }

    /// Quadratic curve to `(x, y)` with control point `(cx, cy)`.
    pub fn curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.push(Command::QuadTo {
            ctrl: Point::new(cx, cy),
            to: Point::new(x, y),
        })
    }

    /// Cubic curve to `(x, y)` with control points `(c1x, c1y)` and
    /// `(c2x, c2y)`.
    pub fn bezier_curve_to(
        &mut self,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.push(Command::CubicTo {
            c1: Point::new(c1x, c1y),
            c2: Point::new(c2x, c2y),
            to: Point::new(x, y),
        })
    }

    /// Circular arc around `(cx, cy)`, canvas semantics: a straight
    /// segment connects it to any existing current point.
    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) -> &mut Self {
        self.push(Command::Arc {
            center: Point::new(cx, cy),
            radius,
            start_angle,
            end_angle,
            ccw,
        })
    }

    /// Axis-aligned rectangle as a closed contour.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.push(Command::Rect(Rect::new(x, y, x + w, y + h)))
    }

    /// Rectangle with circular corners of the given radius.
    pub fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) -> &mut Self {
        self.push(Command::RoundRect {
            rect: Rect::new(x, y, x + w, y + h),
            radius,
        })
    }

    /// Full circle centered at `(cx, cy)`.
    pub fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64) -> &mut Self {
        self.push(Command::Circle {
            center: Point::new(cx, cy),
            radius,
        })
    }

    /// Ellipse inscribed in the rectangle at `(x, y)` of size `w` x `h`.
    pub fn draw_ellipse(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.push(Command::Ellipse(Rect::new(x, y, x + w, y + h)))
    }

    /// Closes the current contour back to its starting point.
    pub fn close_path(&mut self) -> &mut Self {
        self.push(Command::ClosePath)
    }

    /// Appends the instructions encoded in `data`.
    ///
    /// Decoding is all-or-nothing: on error the queue is unchanged.
    pub fn decode_path(&mut self, data: &str) -> Result<&mut Self, PathDecodeError> {
        let cmds = decode::decode_path(data)?;
        self.active.extend(cmds);
        self.dirty = true;
        Ok(self)
    }

    /// Ends the active sub-path and fills subsequent sub-paths with
    /// `paint`.
    pub fn begin_fill(&mut self, paint: Paint) -> &mut Self {
        self.commit_active();
        self.fill = Some(paint);
        self
    }

    /// Ends the active sub-path and stops filling subsequent ones.
    pub fn end_fill(&mut self) -> &mut Self {
        self.commit_active();
        self.fill = None;
        self
    }

    /// Ends the active sub-path and strokes subsequent sub-paths with
    /// `paint`.
    pub fn begin_stroke(&mut self, paint: Paint) -> &mut Self {
        self.commit_active();
        self.stroke = Some(paint);
        self
    }

    /// Ends the active sub-path and stops stroking subsequent ones.
    pub fn end_stroke(&mut self) -> &mut Self {
        self.commit_active();
        self.stroke = None;
        self
    }

    /// Ends the active sub-path and sets the pen for subsequent
    /// strokes.
    pub fn set_stroke_style(&mut self, style: StrokeStyle) -> &mut Self {
        self.commit_active();
        self.stroke_style = Some(style);
        self
    }

    /// Ends the active sub-path and sets the dash pattern for
    /// subsequent strokes.
    pub fn set_stroke_dash(&mut self, pattern: Vec<f64>, offset: f64) -> &mut Self {
        self.commit_active();
        self.stroke_dash = Some((pattern, offset));
        self
    }

    /// Replays the full instruction queue onto `painter`.
    ///
    /// The still-active sub-path is replayed with the styles currently
    /// in effect, without committing it, so drawing never perturbs the
    /// builder state.
    pub fn draw(&self, painter: &mut dyn Painter) {
        for cmd in &self.committed {
            cmd.execute(painter);
        }
        if self.active.is_empty() {
            return;
        }
        painter.begin_path();
        for cmd in &self.active {
            cmd.execute(painter);
        }
        if let Some(fill) = &self.fill {
            painter.set_fill_paint(Some(fill));
            painter.fill();
        }
        if let Some(stroke) = &self.stroke {
            if let Some(style) = &self.stroke_style {
                painter.set_stroke_style(style);
            }
            if let Some((pattern, offset)) = &self.stroke_dash {
                painter.set_stroke_dash(pattern, *offset);
            }
            painter.set_stroke_paint(Some(stroke));
            painter.stroke();
        }
    }

    /// Replays only path instructions, as one combined path.
    ///
    /// Used for masks and clips, where style and realization
    /// instructions are irrelevant and intermediate path resets would
    /// drop earlier sub-paths.
    pub fn draw_as_path(&self, painter: &mut dyn Painter) {
        painter.begin_path();
        for cmd in self.committed.iter().chain(&self.active) {
            if cmd.is_path() && *cmd != Command::BeginPath {
                cmd.execute(painter);
            }
        }
    }

    /// The flattened instruction list, rebuilt if stale.
    pub fn instructions(&mut self) -> &[Command] {
        self.rebake();
        &self.baked
    }

    fn push(&mut self, cmd: Command) -> &mut Self {
        self.active.push(cmd);
        self.dirty = true;
        self
    }

    /// Moves the active sub-path, with the styles currently in
    /// effect, into the committed list.
    fn commit_active(&mut self) {
        self.dirty = true;
        if self.active.is_empty() {
            return;
        }
        self.committed.push(Command::BeginPath);
        self.committed.append(&mut self.active);
        self.push_realization(true);
    }

    fn rebake(&mut self) {
        if !self.dirty && !self.baked.is_empty() {
            return;
        }
        self.baked.clear();
        self.baked.extend_from_slice(&self.committed);
        if !self.active.is_empty() {
            self.baked.push(Command::BeginPath);
            self.baked.extend_from_slice(&self.active);
            self.push_realization(false);
        }
        self.dirty = false;
    }

    /// Appends fill/stroke realization for the current styles to
    /// either the committed list or the baked cache.
    fn push_realization(&mut self, committed: bool) {
        let out = if committed {
            &mut self.committed
        } else {
            &mut self.baked
        };
        if let Some(fill) = &self.fill {
            out.push(Command::SetFill(Some(fill.clone())));
            out.push(Command::Fill);
        }
        if let Some(stroke) = &self.stroke {
            if let Some(style) = &self.stroke_style {
                out.push(Command::SetStrokeStyle(style.clone()));
            }
            if let Some((pattern, offset)) = &self.stroke_dash {
                out.push(Command::SetStrokeDash {
                    pattern: pattern.clone(),
                    offset: *offset,
                });
            }
            out.push(Command::SetStroke(Some(stroke.clone())));
            out.push(Command::Stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use alloc::vec;

    fn solid() -> Paint {
        Paint::Solid(Color::BLACK)
    }

    #[test]
    fn empty_until_path_instructions() {
        let mut g = Graphics::new();
        assert!(g.is_empty());
        g.begin_fill(solid());
        assert!(g.is_empty());
        g.rect(0.0, 0.0, 10.0, 10.0);
        assert!(!g.is_empty());
    }

    #[test]
    fn pending_styles_appear_in_replay_without_committing() {
        let mut g = Graphics::new();
        g.begin_fill(solid()).rect(0.0, 0.0, 10.0, 10.0);
        let cmds = g.instructions().to_vec();
        assert_eq!(
            cmds,
            [
                Command::BeginPath,
                Command::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)),
                Command::SetFill(Some(solid())),
                Command::Fill,
            ]
        );
        // The sub-path is still active: more geometry joins it.
        g.rect(20.0, 0.0, 10.0, 10.0);
        assert_eq!(g.instructions().len(), 5);
    }

    #[test]
    fn style_change_freezes_earlier_subpath() {
        let red = Paint::Solid(Color::rgb(255, 0, 0));
        let blue = Paint::Solid(Color::rgb(0, 0, 255));
        let mut g = Graphics::new();
        g.begin_fill(red.clone())
            .rect(0.0, 0.0, 10.0, 10.0)
            .begin_fill(blue.clone())
            .rect(20.0, 0.0, 10.0, 10.0);
        let cmds = g.instructions().to_vec();
        let fills: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                Command::SetFill(Some(p)) => Some(p.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fills, [red, blue]);
        // Two sub-paths, each starting fresh.
        let begins = cmds.iter().filter(|c| **c == Command::BeginPath).count();
        assert_eq!(begins, 2);
    }

    #[test]
    fn end_fill_commits_without_new_style() {
        let mut g = Graphics::new();
        g.begin_fill(solid()).rect(0.0, 0.0, 4.0, 4.0).end_fill();
        g.rect(10.0, 0.0, 4.0, 4.0);
        let cmds = g.instructions().to_vec();
        // The trailing unfilled rect produces no realization.
        assert_eq!(cmds.last(), Some(&Command::Rect(Rect::new(10.0, 0.0, 14.0, 4.0))));
        assert_eq!(cmds.iter().filter(|c| **c == Command::Fill).count(), 1);
    }

    #[test]
    fn stroke_realization_carries_pen_and_dash() {
        let mut g = Graphics::new();
        g.set_stroke_style(StrokeStyle::new(3.0))
            .set_stroke_dash(vec![4.0, 2.0], 1.0)
            .begin_stroke(solid())
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0);
        let cmds = g.instructions().to_vec();
        assert_eq!(
            cmds[3],
            Command::SetStrokeStyle(StrokeStyle::new(3.0))
        );
        assert_eq!(
            cmds[4],
            Command::SetStrokeDash {
                pattern: vec![4.0, 2.0],
                offset: 1.0
            }
        );
        assert_eq!(cmds.last(), Some(&Command::Stroke));
    }

    #[test]
    fn decode_error_leaves_queue_unchanged() {
        let mut g = Graphics::new();
        g.move_to(1.0, 2.0);
        let before = g.instructions().to_vec();
        assert!(g.decode_path("A!").is_err());
        assert_eq!(g.instructions(), &before[..]);
    }

    #[test]
    fn draw_as_path_skips_styles_and_path_resets() {
        let mut g = Graphics::new();
        g.begin_fill(solid())
            .rect(0.0, 0.0, 4.0, 4.0)
            .begin_fill(solid())
            .rect(10.0, 0.0, 4.0, 4.0);
        let mut rec = crate::Recorder::new();
        g.draw_as_path(&mut rec);
        let ops = rec.finish();
        // One begin_path, two rects, nothing else.
        assert_eq!(ops.len(), 3);
    }

    #[test]
    fn clear_resets_styles_too() {
        let mut g = Graphics::new();
        g.begin_fill(solid()).rect(0.0, 0.0, 4.0, 4.0);
        g.clear();
        assert!(g.is_empty());
        g.rect(0.0, 0.0, 4.0, 4.0);
        assert!(
            !g.instructions()
                .iter()
                .any(|c| matches!(c, Command::SetFill(_)))
        );
    }
}
