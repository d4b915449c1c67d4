// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limelight Graphics: deferred vector drawing for the Limelight display list.
//!
//! - [`Graphics`] is a retained instruction queue built through chained
//!   canvas-style calls and replayed on every draw. Style calls freeze
//!   the sub-path they close, so one queue can carry many differently
//!   styled contours.
//! - [`Painter`] is the rendering boundary: a canvas-shaped trait the
//!   embedding implements once per backend. The toolkit never touches
//!   pixels or platform surfaces itself.
//! - [`decode_path`] expands the compact base64 path encoding into
//!   instructions, with positioned errors for malformed input.
//! - [`Recorder`] / [`Recording`] capture and replay painter calls;
//!   sub-tree caching is built on them.
//! - [`PixelProbe`] answers "would this drawing cover that point?",
//!   giving the scene tree shape-accurate hit tests without a raster
//!   target.
//!
//! # Example
//!
//! ```
//! use limelight_graphics::{Color, Graphics, Paint, PixelProbe};
//! use kurbo::Point;
//!
//! let mut g = Graphics::new();
//! g.begin_fill(Paint::Solid(Color::rgb(255, 0, 0)))
//!     .draw_circle(0.0, 0.0, 50.0);
//!
//! let mut probe = PixelProbe::new(Point::new(10.0, 10.0));
//! g.draw(&mut probe);
//! assert!(probe.hit());
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Either the `std` or the
//! `libm` feature must be enabled for float math.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("limelight_graphics requires either the `std` or `libm` feature");

mod command;
mod decode;
mod graphics;
mod painter;
mod probe;
mod record;
mod style;

pub use command::Command;
pub use decode::{PathDecodeError, decode_path};
pub use graphics::Graphics;
pub use painter::Painter;
pub use probe::PixelProbe;
pub use record::{Op, Recorder, Recording};
pub use style::{
    Color, CompositeOperation, GradientStop, ImageHandle, LineCap, LineJoin, Paint,
    PatternRepeat, Shadow, StrokeStyle,
};
