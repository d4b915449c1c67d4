// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limelight Scene: a retained 2D display tree with events, picking,
//! and caching.
//!
//! The [`Stage`] owns every node in a generational arena and exposes
//! the whole display-list API through [`NodeId`] handles: parent/child
//! structure, transforms and render state, capture/bubble event
//! dispatch, pixel-accurate picking, pointer interaction, sub-tree
//! caching, and the per-frame update cycle.
//!
//! - Nodes are either containers or leaves carrying a [`Drawable`]
//!   ([`Shape`], [`Bitmap`], [`Sprite`], [`Text`], or an embedding's
//!   own type).
//! - Rendering goes through [`Painter`]; the stage emits canvas-style
//!   calls and never touches pixels.
//! - Hit testing replays the same draw code into a probe, so picking
//!   agrees with painting by construction.
//!
//! # Example
//!
//! ```
//! use limelight_graphics::{Color, Paint, Recorder};
//! use limelight_scene::{Content, Shape, Stage};
//!
//! let mut stage = Stage::new(640.0, 480.0);
//! let mut shape = Shape::new();
//! shape
//!     .graphics
//!     .begin_fill(Paint::Solid(Color::rgb(220, 40, 40)))
//!     .draw_circle(0.0, 0.0, 40.0);
//! let ball = stage
//!     .add_child(stage.root(), Content::Leaf(Box::new(shape)))
//!     .unwrap();
//! stage.set_position(ball, 100.0, 100.0);
//!
//! let mut painter = Recorder::new();
//! stage.update(&mut painter, 16.0);
//! assert!(!painter.finish().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Either the `std` or the
//! `libm` feature must be enabled for float math.
//!
//! [`Painter`]: limelight_graphics::Painter

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("limelight_scene requires either the `std` or `libm` feature");

mod cache;
mod draw;
mod drawable;
mod filter;
mod pick;
mod pointer;
mod sprite;
mod stage;
mod transform;
mod types;

// The event vocabulary is part of this crate's API surface.
pub use limelight_dispatch::{Event, EventPayload, EventType, ListenerToken, Phase};

pub use draw::DrawPass;
pub use drawable::{Bitmap, Drawable, Shape, Text};
pub use filter::{BlurFilter, Filter};
pub use pointer::{MOUSE_POINTER_ID, PointerState};
pub use sprite::{Animation, Frame, Sprite, SpriteSheet};
pub use stage::{Content, Stage};
pub use types::{ConcatProps, DisplayProps, NodeFlags, NodeId, PickMode};
