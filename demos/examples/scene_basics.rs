// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a small display tree, draw a frame, and pick into it.
//!
//! Run:
//! - `cargo run -p limelight_demos --example scene_basics`

use kurbo::Rect;
use limelight_graphics::{Color, Paint, Recorder, StrokeStyle};
use limelight_scene::{Content, PickMode, Shape, Stage, Text};

fn main() {
    let mut stage = Stage::new(640.0, 480.0);

    // A panel with a filled background and a stroked border.
    let panel = stage.add_child(stage.root(), Content::Container).unwrap();
    stage.set_position(panel, 40.0, 40.0);

    let mut background = Shape::new();
    background
        .graphics
        .begin_fill(Paint::Solid(Color::rgb(30, 30, 46)))
        .round_rect(0.0, 0.0, 320.0, 200.0, 12.0)
        .begin_stroke(Paint::Solid(Color::rgb(137, 180, 250)))
        .set_stroke_style(StrokeStyle::new(2.0))
        .round_rect(0.0, 0.0, 320.0, 200.0, 12.0);
    stage
        .add_child(panel, Content::Leaf(Box::new(background)))
        .unwrap();

    // A shape built from the compact encoded-path format: a horizontal
    // line from (-150, 0) to (150, 0).
    let mut encoded = Shape::new();
    encoded
        .graphics
        .begin_stroke(Paint::Solid(Color::rgb(243, 139, 168)))
        .set_stroke_style(StrokeStyle::new(4.0))
        .decode_path("A3cAAMAu4AAA")
        .expect("valid encoded path");
    let line = stage
        .add_child(panel, Content::Leaf(Box::new(encoded)))
        .unwrap();
    stage.set_position(line, 160.0, 100.0);

    let mut label = Text::new("limelight", 24.0, Color::rgb(205, 214, 244));
    label.line_bounds = Some(Rect::new(0.0, -24.0, 120.0, 6.0));
    let label = stage
        .add_child(panel, Content::Leaf(Box::new(label)))
        .unwrap();
    stage.set_position(label, 16.0, 32.0);
    stage.set_name(label, Some("title".into()));

    // Draw one frame into a recording painter.
    let mut painter = Recorder::new();
    stage.update(&mut painter, 16.0);
    let recording = painter.finish();
    println!("frame captured: {} painter ops", recording.len());

    // Picking agrees with what was painted.
    for (x, y) in [(200.0, 140.0), (60.0, 60.0), (10.0, 10.0)] {
        match stage.object_under_point(x, y, PickMode::All) {
            Some(hit) => {
                let name = stage.name(hit).unwrap_or("<unnamed>");
                println!("({x:>5}, {y:>5}) -> {hit:?} ({name})");
            }
            None => println!("({x:>5}, {y:>5}) -> nothing"),
        }
    }

    // Bounds aggregate up the tree through each child's transform.
    if let Some(bounds) = stage.transformed_bounds(panel) {
        println!("panel bounds in stage space: {bounds:?}");
    }
}
