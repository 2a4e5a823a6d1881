// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-interval geometry helpers over [`kurbo::Rect`].
//!
//! The index needs boundary-inclusive containment and overlap (a zero-area
//! touch counts as an intersection), a fixed corner ordering, and quadrant
//! selection by nearest corner. Kurbo's own predicates are half-open, so the
//! inclusive forms live here. Rectangles are assumed well-formed
//! (`x0 <= x1`, `y0 <= y1`); nothing here normalizes or validates.

use kurbo::{Point, Rect};

/// Number of corners of a rectangle; also the number of quarters of a quad.
pub const CORNERS: usize = 4;

/// Corner of `rect` by index.
///
/// Corners are ordered `(x0, y0), (x1, y0), (x1, y1), (x0, y1)`.
///
/// # Panics
///
/// Panics if `index >= 4`.
pub fn corner(rect: Rect, index: usize) -> Point {
    const FIELDS: [(bool, bool); CORNERS] =
        [(false, false), (true, false), (true, true), (false, true)];

    let (max_x, max_y) = FIELDS[index];
    Point::new(
        if max_x { rect.x1 } else { rect.x0 },
        if max_y { rect.y1 } else { rect.y0 },
    )
}

/// Index of the corner of `rect` nearest to `point`.
///
/// This is quadrant selection relative to the rect's center: with
/// `d = point - center`, the mapping is `(d.x < 0, d.y < 0) -> 0`,
/// `(d.x >= 0, d.y < 0) -> 1`, `(d.x >= 0, d.y >= 0) -> 2`,
/// `(d.x < 0, d.y >= 0) -> 3`, consistent with [`corner`] ordering.
pub fn nearest_corner_index(rect: Rect, point: Point) -> usize {
    const TRANSLATION: [usize; CORNERS] = [0, 1, 3, 2];

    let direction = point - rect.center();
    TRANSLATION[usize::from(direction.x >= 0.0) + 2 * usize::from(direction.y >= 0.0)]
}

/// Whether `rect` contains `point`, boundaries included.
pub fn contains_point(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Whether `outer` fully contains `inner`, boundaries included.
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Whether `a` and `b` overlap, boundaries included (zero-area touch counts).
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.x0.max(b.x0) <= a.x1.min(b.x1) && a.y0.max(b.y0) <= a.y1.min(b.y1)
}

/// Whether `rect` meets the circle at `center` with `radius`, by the
/// nearest-corner test.
///
/// This is an approximation, kept for compatibility with rectangle callers:
/// it measures the distance from `center` to the rect's nearest *corner*
/// (per [`nearest_corner_index`]), not to the nearest point on the boundary,
/// and under-reports rects whose nearest point lies on an edge.
pub fn intersects_circle(rect: Rect, center: Point, radius: f64) -> bool {
    corner(rect, nearest_corner_index(rect, center)).distance(center) <= radius
}

/// Quarter of `bounds` by corner index, split at `center`.
pub(crate) fn quarter(bounds: Rect, center: Point, index: usize) -> Rect {
    const MIN_FIELDS: [(usize, usize); CORNERS] = [(0, 0), (1, 0), (1, 1), (0, 1)];
    const MAX_FIELDS: [(usize, usize); CORNERS] = [(1, 1), (2, 1), (2, 2), (1, 2)];

    let xs = [bounds.x0, center.x, bounds.x1];
    let ys = [bounds.y0, center.y, bounds.y1];

    let (min_x, min_y) = MIN_FIELDS[index];
    let (max_x, max_y) = MAX_FIELDS[index];
    Rect::new(xs[min_x], ys[min_y], xs[max_x], ys[max_y])
}
