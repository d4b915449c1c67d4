// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill, stroke, and compositing style types shared by the instruction
//! queue and the painter boundary.

use alloc::vec::Vec;

use kurbo::Point;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// A color from a `0xRRGGBB` value, fully opaque.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
            a: 255,
        }
    }

    /// This color with its alpha replaced by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0) as u8,
            ..self
        }
    }
}

/// A single stop in a gradient ramp.
///
/// `offset` is in `[0, 1]` along the gradient axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis.
    pub offset: f64,
    /// Color at this stop.
    pub color: Color,
}

/// A fill or stroke source.
///
/// Gradients carry their geometry in the local (untransformed) space of
/// the instruction queue that references them.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// A single flat color.
    Solid(Color),
    /// A linear gradient along the `start`..`end` axis.
    Linear {
        /// Start of the gradient axis.
        start: Point,
        /// End of the gradient axis.
        end: Point,
        /// Color ramp, offsets in `[0, 1]`.
        stops: Vec<GradientStop>,
    },
    /// A radial gradient between two circles.
    Radial {
        /// Center of the inner circle.
        start: Point,
        /// Radius of the inner circle.
        start_radius: f64,
        /// Center of the outer circle.
        end: Point,
        /// Radius of the outer circle.
        end_radius: f64,
        /// Color ramp, offsets in `[0, 1]`.
        stops: Vec<GradientStop>,
    },
    /// A repeating image pattern.
    Pattern {
        /// Image to tile.
        image: ImageHandle,
        /// Tiling mode.
        repeat: PatternRepeat,
    },
}

impl Paint {
    /// Maximum alpha this paint can contribute, in `[0, 1]`.
    ///
    /// Used by coverage probing to decide whether a fill can register a
    /// hit at all. Gradients report the most opaque stop; patterns are
    /// treated as fully opaque.
    pub fn max_alpha(&self) -> f64 {
        match self {
            Self::Solid(c) => f64::from(c.a) / 255.0,
            Self::Linear { stops, .. } | Self::Radial { stops, .. } => stops
                .iter()
                .map(|s| f64::from(s.color.a) / 255.0)
                .fold(0.0, f64::max),
            Self::Pattern { .. } => 1.0,
        }
    }
}

/// Tiling behavior of a [`Paint::Pattern`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs, reason = "names mirror the canvas vocabulary")]
pub enum PatternRepeat {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

/// Stroke line cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs, reason = "names mirror the canvas vocabulary")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke line join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs, reason = "names mirror the canvas vocabulary")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Pen geometry for stroked sub-paths.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Pen width in local units.
    pub width: f64,
    /// End-of-line cap shape.
    pub cap: LineCap,
    /// Corner join shape.
    pub join: LineJoin,
    /// Miter length cutoff for [`LineJoin::Miter`].
    pub miter_limit: f64,
    /// When set, the stroke width is not affected by the transform in
    /// effect at draw time (hairline-style strokes).
    pub ignore_scale: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            ignore_scale: false,
        }
    }
}

impl StrokeStyle {
    /// A pen of the given width with default cap and join.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

/// A drop shadow applied to everything a display object paints.
#[derive(Clone, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color, usually translucent.
    pub color: Color,
    /// Horizontal offset in stage pixels.
    pub offset_x: f64,
    /// Vertical offset in stage pixels.
    pub offset_y: f64,
    /// Blur radius.
    pub blur: f64,
}

impl Shadow {
    /// A shadow with the given color, offset, and blur.
    pub fn new(color: Color, offset_x: f64, offset_y: f64, blur: f64) -> Self {
        Self {
            color,
            offset_x,
            offset_y,
            blur,
        }
    }
}

/// Pixel blend mode, mirroring the canvas `globalCompositeOperation`
/// vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs, reason = "names mirror the canvas vocabulary")]
pub enum CompositeOperation {
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
}

impl CompositeOperation {
    /// The canvas-compatible name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::SourceIn => "source-in",
            Self::SourceOut => "source-out",
            Self::SourceAtop => "source-atop",
            Self::DestinationOver => "destination-over",
            Self::DestinationIn => "destination-in",
            Self::DestinationOut => "destination-out",
            Self::DestinationAtop => "destination-atop",
            Self::Lighter => "lighter",
            Self::Copy => "copy",
            Self::Xor => "xor",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
        }
    }
}

/// An opaque reference to a decoded image owned by the embedding
/// backend.
///
/// The toolkit never touches pixel data; it only forwards handles to
/// the painter together with the intrinsic size it needs for layout
/// and hit bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    /// Backend-assigned identifier.
    pub id: u64,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

impl ImageHandle {
    /// A handle with the given id and intrinsic size.
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::from_hex(0x1a_2b_3c);
        assert_eq!(c, Color::rgba(0x1a, 0x2b, 0x3c, 0xff));
    }

    #[test]
    fn gradient_max_alpha_takes_most_opaque_stop() {
        let p = Paint::Linear {
            start: Point::ZERO,
            end: Point::new(100.0, 0.0),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: Color::TRANSPARENT,
                },
                GradientStop {
                    offset: 1.0,
                    color: Color::BLACK.with_alpha(0.5),
                },
            ],
        };
        let a = p.max_alpha();
        assert!((a - 127.0 / 255.0).abs() < 1e-9);
    }
}
