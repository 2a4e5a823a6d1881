// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving shapes.
//!
//! Drift a handful of shapes across the indexed region and keep querying a
//! fixed window and a probe circle; the index follows every move.
//!
//! Run:
//! - `cargo run -p bosk_demos --example moving_shapes`

use bosk_quad_tree::QuadTree;
use kurbo::{Point, Rect, Vec2};

fn main() {
    let mut tree = QuadTree::new();
    let _arena = tree.acquire(Rect::new(0.0, 0.0, 100.0, 100.0));

    let mut movers = Vec::new();
    for i in 0..8 {
        let x = 2.0 + f64::from(i) * 3.0;
        movers.push(tree.acquire(Rect::new(x, 2.0, x + 2.0, 4.0)));
    }

    let window = Rect::new(40.0, 40.0, 60.0, 60.0);
    let step = Vec2::new(1.5, 1.5);

    for tick in 0..32 {
        for &id in &movers {
            let bounds = tree.shape(id).expect("movers stay alive").bounds();
            tree.set_bounds(id, bounds + step);
        }

        let in_window = tree.find(window).len();
        let near_probe = tree.find_around(Point::new(50.0, 50.0), 6.0).len();
        if tick % 8 == 7 {
            println!("tick {tick:2}: window={in_window} probe={near_probe}");
        }
    }

    // Everything drifted 48 units; all movers are still indexed.
    let everything = tree.find(tree.bounds());
    assert_eq!(everything.len(), movers.len() + 1);
    println!("final bounds {:?}", tree.bounds());
}
