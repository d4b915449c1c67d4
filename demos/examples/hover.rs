// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rollover and rollout across an ancestor chain.
//!
//! Moving between two buttons inside the same toolbar fires exactly
//! the events a UI needs: the old button rolls out, the new one rolls
//! in, and the shared toolbar sees neither because it never stopped
//! being hovered.
//!
//! Run:
//! - `cargo run -p limelight_demos --example hover`

use std::cell::RefCell;
use std::rc::Rc;

use limelight_graphics::{Color, Paint};
use limelight_scene::{Content, Event, EventType, NodeId, Shape, Stage, MOUSE_POINTER_ID};

fn button(stage: &mut Stage, toolbar: NodeId, x: f64, name: &str) -> NodeId {
    let mut face = Shape::new();
    face.graphics
        .begin_fill(Paint::Solid(Color::rgb(49, 50, 68)))
        .round_rect(0.0, 0.0, 80.0, 30.0, 6.0);
    let id = stage
        .add_child(toolbar, Content::Leaf(Box::new(face)))
        .unwrap();
    stage.set_position(id, x, 5.0);
    stage.set_name(id, Some(name.into()));
    id
}

fn main() {
    let mut stage = Stage::new(640.0, 480.0);
    stage.enable_mouse_over(true);

    let toolbar = stage.add_child(stage.root(), Content::Container).unwrap();
    stage.set_position(toolbar, 20.0, 20.0);
    stage.set_name(toolbar, Some("toolbar".into()));
    let open = button(&mut stage, toolbar, 10.0, "open");
    let save = button(&mut stage, toolbar, 100.0, "save");

    let transcript = Rc::new(RefCell::new(Vec::new()));
    let listen = |stage: &Stage, id: NodeId, label: &'static str| {
        for ty in [
            EventType::RollOver,
            EventType::RollOut,
            EventType::MouseOver,
            EventType::MouseOut,
        ] {
            let transcript = Rc::clone(&transcript);
            stage.add_listener(id, ty, false, move |e: &mut Event<NodeId>| {
                transcript.borrow_mut().push(format!("{label}: {:?}", e.ty));
            });
        }
    };
    listen(&stage, toolbar, "toolbar");
    listen(&stage, open, "open");
    listen(&stage, save, "save");

    // Into "open", across to "save", then off the toolbar entirely.
    for (x, y) in [(50.0, 40.0), (140.0, 40.0), (400.0, 400.0)] {
        stage.pointer_move(MOUSE_POINTER_ID, x, y);
        println!("-- pointer at ({x}, {y})");
        for line in transcript.borrow_mut().drain(..) {
            println!("   {line}");
        }
    }
}
