// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random shapes.
//!
//! Acquire a batch of randomly placed shapes, run a window query, release
//! the odd-tagged half, and query the whole indexed region again.
//!
//! Run:
//! - `cargo run -p bosk_demos --example random_shapes`

use bosk_quad_tree::QuadTree;
use kurbo::{Point, Rect, Size};
use rand::Rng;

const SHAPE_COUNT: usize = 105;

fn main() {
    let mut rng = rand::rng();
    let mut tree = QuadTree::new();

    let mut shapes = Vec::with_capacity(SHAPE_COUNT);
    for index in 0..SHAPE_COUNT {
        let center = Point::new(
            10.0 * (rng.random_range(0.0..1.0) - 0.5),
            10.0 * (rng.random_range(0.0..1.0) - 0.5),
        );
        let size = Size::new(
            (6.0 * rng.random_range(0.0_f64..1.0)).max(1.0),
            (6.0 * rng.random_range(0.0_f64..1.0)).max(1.0),
        );
        let id = tree.acquire(Rect::from_center_size(center, size));
        tree.set_tag(id, index as u64);
        shapes.push(id);
    }
    println!("indexed {} shapes over {:?}", tree.len(), tree.bounds());

    let window = Rect::new(2.5, 2.5, 3.95, 4.8);
    let matches = tree.find(window);
    println!("{} shapes match the window {:?}", matches.len(), window);

    // Drop the odd-tagged half.
    shapes.retain(|&id| {
        let keep = tree.shape(id).map(|shape| shape.tag() % 2 == 0).unwrap_or(false);
        if !keep {
            tree.release(id);
        }
        keep
    });
    println!("released down to {} shapes", tree.len());

    let survivors = tree.find(tree.bounds());
    assert_eq!(survivors.len(), shapes.len());
    for id in survivors {
        let tag = tree.shape(id).expect("query returned a live shape").tag();
        assert_eq!(tag % 2, 0, "only even-tagged shapes survive");
    }
    println!("full-region query agrees: {} survivors", shapes.len());
}
