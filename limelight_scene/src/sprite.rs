// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-based sprite animation over a shared sprite sheet.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use kurbo::Rect;

use limelight_dispatch::EventType;
use limelight_graphics::{ImageHandle, Painter};

use crate::drawable::Drawable;

/// One frame of a sprite sheet: a source rectangle plus the
/// registration point the frame draws around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Source rectangle in the sheet image.
    pub rect: Rect,
    /// Registration point x, relative to the frame rect.
    pub reg_x: f64,
    /// Registration point y, relative to the frame rect.
    pub reg_y: f64,
}

/// A named frame sequence.
#[derive(Clone, Debug)]
pub struct Animation {
    /// Indices into the sheet's frame list.
    pub frames: Vec<usize>,
    /// Animation to chain into when this one ends; `None` stops.
    pub next: Option<String>,
    /// Playback speed multiplier.
    pub speed: f64,
}

/// An image atlas with frame geometry and named animations.
///
/// Sheets are immutable once built and shared between sprites via
/// `Rc`. Parsing sheet descriptions out of interchange formats is the
/// embedding's job; this is only the in-memory model.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    image: ImageHandle,
    frames: Vec<Frame>,
    animations: BTreeMap<String, Animation>,
    framerate: f64,
}

impl SpriteSheet {
    /// An empty sheet over `image` with a default playback rate.
    pub fn new(image: ImageHandle, framerate: f64) -> Self {
        Self {
            image,
            frames: Vec::new(),
            animations: BTreeMap::new(),
            framerate,
        }
    }

    /// Appends one frame and returns its index.
    pub fn add_frame(&mut self, rect: Rect, reg_x: f64, reg_y: f64) -> usize {
        self.frames.push(Frame { rect, reg_x, reg_y });
        self.frames.len() - 1
    }

    /// Splits `image` into a uniform grid of `cols × rows` frames.
    pub fn add_grid(&mut self, cols: u32, rows: u32) {
        let fw = f64::from(self.image.width) / f64::from(cols);
        let fh = f64::from(self.image.height) / f64::from(rows);
        for row in 0..rows {
            for col in 0..cols {
                let x = f64::from(col) * fw;
                let y = f64::from(row) * fh;
                self.frames.push(Frame {
                    rect: Rect::new(x, y, x + fw, y + fh),
                    reg_x: 0.0,
                    reg_y: 0.0,
                });
            }
        }
    }

    /// Registers (or replaces) a named animation.
    pub fn define_animation(&mut self, name: impl Into<String>, animation: Animation) {
        self.animations.insert(name.into(), animation);
    }

    /// The frame at `index`, if defined.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of frames in the sheet.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Looks up a named animation.
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    /// The sheet's default playback rate, in frames per second.
    pub fn framerate(&self) -> f64 {
        self.framerate
    }
}

/// A leaf that plays sprite-sheet animations.
///
/// Time is fed in from the stage tick; a non-looping animation that
/// reaches its last frame pauses and surfaces
/// [`EventType::AnimationEnd`] for at-target dispatch on the owning
/// node. Unknown animation names and out-of-range frames are soft
/// no-ops.
#[derive(Clone, Debug)]
pub struct Sprite {
    sheet: Rc<SpriteSheet>,
    /// Fractional frame position, either within the current animation
    /// or over the whole sheet.
    position: f64,
    current_animation: Option<String>,
    /// Whether playback is currently halted.
    pub paused: bool,
    /// Overrides the sheet framerate when positive.
    pub framerate: f64,
}

impl Sprite {
    /// A paused sprite showing the sheet's first frame.
    pub fn new(sheet: Rc<SpriteSheet>) -> Self {
        Self {
            sheet,
            position: 0.0,
            current_animation: None,
            paused: true,
            framerate: 0.0,
        }
    }

    /// The sheet this sprite plays from.
    pub fn sheet(&self) -> &Rc<SpriteSheet> {
        &self.sheet
    }

    /// The name of the playing animation, if any.
    pub fn current_animation(&self) -> Option<&str> {
        self.current_animation.as_deref()
    }

    /// The sheet frame currently displayed.
    pub fn current_frame(&self) -> usize {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "position is kept within the frame range"
        )]
        let pos = self.position.max(0.0) as usize;
        match self.animation() {
            Some(anim) => anim.frames.get(pos).copied().unwrap_or(0),
            None => pos,
        }
    }

    /// Resumes playback from the current position.
    pub fn play(&mut self) {
        self.paused = false;
    }

    /// Pauses playback, keeping the current position.
    pub fn stop(&mut self) {
        self.paused = true;
    }

    /// Jumps to the start of a named animation and plays it.
    pub fn goto_and_play(&mut self, name: &str) {
        if self.select_animation(name) {
            self.paused = false;
        }
    }

    /// Jumps to the start of a named animation, paused.
    pub fn goto_and_stop(&mut self, name: &str) {
        if self.select_animation(name) {
            self.paused = true;
        }
    }

    /// Jumps to a raw sheet frame and plays from there.
    pub fn goto_and_play_frame(&mut self, frame: usize) {
        if self.select_frame(frame) {
            self.paused = false;
        }
    }

    /// Jumps to a raw sheet frame, paused.
    pub fn goto_and_stop_frame(&mut self, frame: usize) {
        if self.select_frame(frame) {
            self.paused = true;
        }
    }

    fn animation(&self) -> Option<&Animation> {
        self.current_animation
            .as_deref()
            .and_then(|name| self.sheet.animation(name))
    }

    fn select_animation(&mut self, name: &str) -> bool {
        if self.sheet.animation(name).is_none() {
            return false;
        }
        self.current_animation = Some(String::from(name));
        self.position = 0.0;
        true
    }

    fn select_frame(&mut self, frame: usize) -> bool {
        if frame >= self.sheet.frame_count() {
            return false;
        }
        self.current_animation = None;
        #[allow(
            clippy::cast_precision_loss,
            reason = "frame counts are far below 2^52"
        )]
        {
            self.position = frame as f64;
        }
        true
    }

    fn fps(&self) -> f64 {
        if self.framerate > 0.0 {
            self.framerate
        } else {
            self.sheet.framerate()
        }
    }
}

impl Drawable for Sprite {
    fn draw(&self, painter: &mut dyn Painter) {
        let Some(frame) = self.sheet.frame(self.current_frame()) else {
            return;
        };
        let dest = Rect::new(
            -frame.reg_x,
            -frame.reg_y,
            frame.rect.width() - frame.reg_x,
            frame.rect.height() - frame.reg_y,
        );
        painter.draw_image(&self.sheet.image, Some(frame.rect), dest);
    }

    fn bounds(&self) -> Option<Rect> {
        self.sheet.frame(self.current_frame()).map(|frame| {
            Rect::new(
                -frame.reg_x,
                -frame.reg_y,
                frame.rect.width() - frame.reg_x,
                frame.rect.height() - frame.reg_y,
            )
        })
    }

    fn advance(&mut self, delta_ms: f64) -> Option<EventType> {
        if self.paused {
            return None;
        }
        let fps = self.fps();
        if fps <= 0.0 || delta_ms <= 0.0 {
            return None;
        }
        let steps = delta_ms / 1000.0 * fps;
        match self.animation().cloned() {
            Some(anim) => {
                if anim.frames.is_empty() {
                    return None;
                }
                self.position += steps * anim.speed;
                // Overshoot may chain through several animations; each
                // chained one consumes its own length.
                loop {
                    let Some(anim) = self.animation().cloned() else {
                        return None;
                    };
                    if anim.frames.is_empty() {
                        return None;
                    }
                    #[allow(
                        clippy::cast_precision_loss,
                        reason = "frame counts are far below 2^52"
                    )]
                    let len = anim.frames.len() as f64;
                    if self.position < len {
                        return None;
                    }
                    match &anim.next {
                        Some(next) if self.sheet.animation(next).is_some() => {
                            self.position -= len;
                            self.current_animation = Some(next.clone());
                        }
                        _ => {
                            self.position = len - 1.0;
                            self.paused = true;
                            return Some(EventType::AnimationEnd);
                        }
                    }
                }
            }
            None => {
                if self.sheet.frame_count() == 0 {
                    return None;
                }
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "frame counts are far below 2^52"
                )]
                let total = self.sheet.frame_count() as f64;
                self.position += steps;
                while self.position >= total {
                    self.position -= total;
                }
                None
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
