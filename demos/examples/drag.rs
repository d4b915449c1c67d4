// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press-capture dragging.
//!
//! Once a node is pressed, `PressMove` keeps flowing to it for the
//! whole gesture, even when the pointer leaves the node. Listeners
//! cannot mutate the stage re-entrantly, so the drag handler records
//! the target position into shared state and the input loop applies it
//! between events.
//!
//! Run:
//! - `cargo run -p limelight_demos --example drag`

use std::cell::RefCell;
use std::rc::Rc;

use limelight_graphics::{Color, Paint};
use limelight_scene::{Content, EventPayload, EventType, Shape, Stage, MOUSE_POINTER_ID};

fn main() {
    let mut stage = Stage::new(640.0, 480.0);

    let mut chip = Shape::new();
    chip.graphics
        .begin_fill(Paint::Solid(Color::rgb(166, 227, 161)))
        .draw_circle(0.0, 0.0, 25.0);
    let chip = stage
        .add_child(stage.root(), Content::Leaf(Box::new(chip)))
        .unwrap();
    stage.set_position(chip, 100.0, 100.0);

    // Drag offset captured on press; requested position written by the
    // move handler and applied by the loop below.
    let pending = Rc::new(RefCell::new(None::<(f64, f64)>));
    let grab = Rc::new(RefCell::new((0.0_f64, 0.0_f64)));

    {
        let grab = Rc::clone(&grab);
        stage.add_listener(chip, EventType::MouseDown, false, move |e| {
            if let EventPayload::Pointer { stage_x, stage_y, .. } = e.payload {
                // Remember where inside the chip the press landed.
                *grab.borrow_mut() = (stage_x - 100.0, stage_y - 100.0);
                println!("grabbed at offset {:?}", grab.borrow());
            }
        });
    }
    {
        let pending = Rc::clone(&pending);
        let grab = Rc::clone(&grab);
        stage.add_listener(chip, EventType::PressMove, false, move |e| {
            if let EventPayload::Pointer { stage_x, stage_y, .. } = e.payload {
                let (dx, dy) = *grab.borrow();
                *pending.borrow_mut() = Some((stage_x - dx, stage_y - dy));
            }
        });
    }
    stage.add_listener(chip, EventType::PressUp, false, |_| {
        println!("released");
    });

    // A scripted gesture standing in for real input.
    let gesture = [
        (110.0, 105.0),
        (180.0, 160.0),
        (260.0, 220.0),
        (320.0, 240.0),
    ];
    stage.pointer_down(MOUSE_POINTER_ID, 110.0, 105.0, true);
    for (x, y) in gesture {
        stage.pointer_move(MOUSE_POINTER_ID, x, y);
        if let Some((nx, ny)) = pending.borrow_mut().take() {
            stage.set_position(chip, nx, ny);
            println!("chip moved to ({nx}, {ny})");
        }
    }
    stage.pointer_up(MOUSE_POINTER_ID, 320.0, 240.0);

    let props = stage.props(chip).unwrap();
    println!("final position: ({}, {})", props.x, props.y);
}
