// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public index facade: shape lifetime wired to spatial indexing.

use alloc::vec::Vec;

use bosk_pool::Pool;
use kurbo::{Point, Rect, Size};

use crate::geom;
use crate::shape::{Shape, ShapeId};
use crate::tree::IndexTree;

/// Spatial index over axis-aligned 2D shapes.
///
/// Shapes are acquired from (and live inside) the index; callers hold
/// [`ShapeId`]s and read or mutate shapes through the index, which keeps the
/// spatial structure consistent on every change. The indexed region grows
/// monotonically to cover every acquired shape; growing it invalidates the
/// tree, and the next query rebuilds lazily from the pending shape list.
///
/// Queries take `&mut self` because of that lazy rebuild: a find is logically
/// read-only but physically constructs cached tree state. The index carries
/// no internal synchronization; share it across threads only behind external
/// serialization.
pub struct QuadTree {
    shapes: Pool<Shape>,
    tree: IndexTree,
    bounds: Rect,
}

impl core::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("shapes", &self.shapes.len())
            .field("bounds", &self.bounds)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl Default for QuadTree {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadTree {
    /// Create an empty index.
    ///
    /// The indexed bounds start as a degenerate rect at the origin and only
    /// ever grow; see [`bounds`](Self::bounds).
    pub const fn new() -> Self {
        Self {
            shapes: Pool::new(),
            tree: IndexTree::new(),
            bounds: Rect::ZERO,
        }
    }

    /// Register a shape with the given bounds and return its id.
    ///
    /// Grows the overall indexed bounds to cover `bounds` if needed, which
    /// discards the current tree; otherwise the shape is inserted into the
    /// existing tree incrementally. Rects are assumed well-formed
    /// (`x0 <= x1`, `y0 <= y1`); this is never validated.
    pub fn acquire(&mut self, bounds: Rect) -> ShapeId {
        let id = ShapeId(self.shapes.insert(Shape::new(bounds)));
        self.grow_to(bounds);
        self.tree.push(id, &self.shapes);
        id
    }

    /// Release a shape: remove it from the index and free its pool slot.
    ///
    /// The id (and any copy of it) is stale afterwards. Releasing a stale id
    /// is a no-op.
    pub fn release(&mut self, id: ShapeId) {
        if !self.shapes.contains(id.0) {
            return;
        }
        self.tree.pop(id, &self.shapes);
        let _ = self.shapes.remove(id.0);
    }

    /// Find every shape whose bounds overlap `query` (boundary-inclusive).
    ///
    /// Each matching shape appears exactly once; no further ordering is
    /// guaranteed. Builds the tree first if it is not currently built.
    pub fn find(&mut self, query: Rect) -> Vec<ShapeId> {
        if !self.tree.is_built() {
            self.tree.build(self.bounds, &self.shapes);
        }
        self.tree.find(query, &self.shapes)
    }

    /// Find shapes around `center`, within `radius` by the nearest-corner
    /// test.
    ///
    /// Runs a rectangle query of half-extent `radius` about `center`, then
    /// keeps the candidates that pass [`geom::intersects_circle`]. That test
    /// measures the distance to each shape's nearest *corner*, so shapes
    /// whose nearest point lies on an edge can be missed; callers relying on
    /// exact circle overlap should post-filter the rectangle query instead.
    pub fn find_around(&mut self, center: Point, radius: f64) -> Vec<ShapeId> {
        let query = Rect::from_center_size(center, Size::new(2.0 * radius, 2.0 * radius));
        let mut result = self.find(query);
        result.retain(|id| {
            let shape = self.shapes.get(id.0).expect("find returned a dangling ShapeId");
            geom::intersects_circle(shape.bounds(), center, radius)
        });
        result
    }

    /// The overall indexed bounds: the union of every acquired shape's
    /// bounds (and the origin). Never shrinks, even when shapes are
    /// released.
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Borrow a shape, or `None` if the id is stale.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    /// Whether the id refers to a live shape.
    pub fn is_alive(&self, id: ShapeId) -> bool {
        self.shapes.contains(id.0)
    }

    /// Move or resize a shape.
    ///
    /// The shape is removed from the tree, its bounds and corner points are
    /// replaced, the overall bounds grow if the new rect escapes them, and
    /// the shape is re-inserted. Stale ids are a no-op.
    pub fn set_bounds(&mut self, id: ShapeId, bounds: Rect) {
        if !self.shapes.contains(id.0) {
            return;
        }
        self.tree.pop(id, &self.shapes);
        self.shapes
            .get_mut(id.0)
            .expect("liveness was just checked")
            .set_bounds(bounds);
        self.grow_to(bounds);
        self.tree.push(id, &self.shapes);
    }

    /// Set a shape's opaque tag. Stale ids are a no-op.
    pub fn set_tag(&mut self, id: ShapeId, tag: u64) {
        if let Some(shape) = self.shapes.get_mut(id.0) {
            shape.set_tag(tag);
        }
    }

    /// Number of live shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the index holds no live shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn grow_to(&mut self, bounds: Rect) {
        if !geom::contains_rect(self.bounds, bounds) {
            self.bounds = self.bounds.union(bounds);
            self.tree.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_grows_bounds_monotonically() {
        let mut tree = QuadTree::new();
        assert_eq!(tree.bounds(), Rect::ZERO);

        let _ = tree.acquire(Rect::new(1.0, 1.0, 2.0, 2.0));
        let after_first = tree.bounds();
        assert!(geom::contains_rect(after_first, Rect::new(1.0, 1.0, 2.0, 2.0)));

        let _ = tree.acquire(Rect::new(-3.0, 0.0, -2.0, 1.0));
        let after_second = tree.bounds();
        assert!(geom::contains_rect(after_second, after_first));
        assert!(geom::contains_rect(after_second, Rect::new(-3.0, 0.0, -2.0, 1.0)));

        // A contained shape must not move the bounds.
        let _ = tree.acquire(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(tree.bounds(), after_second);
    }

    #[test]
    fn release_makes_the_id_stale() {
        let mut tree = QuadTree::new();
        let a = tree.acquire(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(tree.is_alive(a));
        assert_eq!(tree.len(), 1);

        tree.release(a);
        assert!(!tree.is_alive(a));
        assert!(tree.shape(a).is_none());
        assert!(tree.is_empty());

        // Stale-id operations are no-ops.
        tree.release(a);
        tree.set_bounds(a, Rect::new(5.0, 5.0, 6.0, 6.0));
        tree.set_tag(a, 9);
        assert!(tree.is_empty());
    }

    #[test]
    fn released_slot_reuse_does_not_resurrect_old_ids() {
        let mut tree = QuadTree::new();
        let a = tree.acquire(Rect::new(0.0, 0.0, 1.0, 1.0));
        tree.release(a);

        let b = tree.acquire(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        assert_ne!(a, b);
    }

    #[test]
    fn set_bounds_moves_the_shape_between_regions() {
        let mut tree = QuadTree::new();
        let world = Rect::new(0.0, 0.0, 8.0, 8.0);
        let _anchor = tree.acquire(world);
        let a = tree.acquire(Rect::new(0.5, 0.5, 1.0, 1.0));

        assert!(tree.find(Rect::new(0.0, 0.0, 2.0, 2.0)).contains(&a));

        tree.set_bounds(a, Rect::new(6.0, 6.0, 7.0, 7.0));
        assert!(!tree.find(Rect::new(0.0, 0.0, 2.0, 2.0)).contains(&a));
        assert!(tree.find(Rect::new(5.5, 5.5, 7.5, 7.5)).contains(&a));
        assert_eq!(tree.shape(a).unwrap().corner(0), Point::new(6.0, 6.0));
    }

    #[test]
    fn set_bounds_outside_the_indexed_region_grows_it() {
        let mut tree = QuadTree::new();
        let a = tree.acquire(Rect::new(0.0, 0.0, 1.0, 1.0));
        let _ = tree.find(tree.bounds());

        tree.set_bounds(a, Rect::new(20.0, 20.0, 21.0, 21.0));
        assert!(geom::contains_rect(tree.bounds(), Rect::new(20.0, 20.0, 21.0, 21.0)));
        assert!(tree.find(Rect::new(19.0, 19.0, 22.0, 22.0)).contains(&a));
    }

    #[test]
    fn tags_are_carried_but_never_indexed() {
        let mut tree = QuadTree::new();
        let a = tree.acquire(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(tree.shape(a).unwrap().tag(), 0);

        tree.set_tag(a, 17);
        assert_eq!(tree.shape(a).unwrap().tag(), 17);
        assert!(tree.find(Rect::new(0.0, 0.0, 1.0, 1.0)).contains(&a));
    }

    #[test]
    fn find_around_uses_the_corner_test() {
        let mut tree = QuadTree::new();
        let a = tree.acquire(Rect::new(2.0, 0.0, 4.0, 1.0));

        // The circle sits inside the shape, but its nearest corner (4, 1) is
        // ~1.118 away; the documented corner test excludes it.
        assert!(tree.find_around(Point::new(3.0, 0.5), 0.4).is_empty());

        // Within reach of the nearest corner.
        assert_eq!(tree.find_around(Point::new(4.2, 1.2), 0.5), [a]);
    }
}
