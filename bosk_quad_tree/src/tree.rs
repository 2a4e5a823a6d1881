// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad storage and index orchestration: build, push, pop, find.
//!
//! Quads live in an arena of slots and reference their quarters by arena
//! index, so discarding a subtree is slot invalidation rather than pointer
//! chasing. The orchestrator keeps a pending list of every queued shape
//! (released shapes leave a tombstone until the next build compacts them)
//! and defers construction entirely: without a root, push and pop only touch
//! the pending list.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use bosk_pool::Pool;
use kurbo::{Point, Rect};

use crate::geom;
use crate::shape::{Shape, ShapeId};

/// Maximum shapes held by a leaf before it splits into quarters.
pub const MAX_SHAPES: usize = 4;

/// Maximum depth of the tree; splitting stops at this level (the root is
/// level 1), so co-located shapes accumulate in the deepest quad instead of
/// recursing forever.
pub const MAX_LEVELS: usize = 8;

/// Arena address of a quad. Never escapes this module.
type QuadId = usize;

/// One node of the spatial partition.
///
/// A leaf holds shapes directly. An interior quad holds up to four quarter
/// quads plus the shapes that straddle a quarter boundary; every other shape
/// is pushed down into the single quarter that fully contains it, so each
/// shape occupies exactly one quad.
struct Quad {
    bounds: Rect,
    center: Point,
    level: usize,
    is_leaf: bool,
    shapes: Vec<ShapeId>,
    quarters: [Option<QuadId>; geom::CORNERS],
}

pub(crate) struct IndexTree {
    quads: Vec<Option<Quad>>,
    free_list: Vec<QuadId>,
    pending: Vec<Option<ShapeId>>,
    root: Option<QuadId>,
}

impl core::fmt::Debug for IndexTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.quads.iter().filter(|q| q.is_some()).count();
        let pending = self.pending.iter().filter(|s| s.is_some()).count();
        f.debug_struct("IndexTree")
            .field("quads_total", &self.quads.len())
            .field("quads_alive", &alive)
            .field("pending", &pending)
            .field("built", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

impl IndexTree {
    pub(crate) const fn new() -> Self {
        Self {
            quads: Vec::new(),
            free_list: Vec::new(),
            pending: Vec::new(),
            root: None,
        }
    }

    /// Discard the tree. The pending list is untouched; the next
    /// [`build`](Self::build) re-creates the index from it.
    pub(crate) fn reset(&mut self) {
        self.quads.clear();
        self.free_list.clear();
        self.root = None;
    }

    /// Whether a root currently exists.
    pub(crate) const fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Build a fresh tree over `bounds`, compacting released entries out of
    /// the pending list and reindexing every survivor.
    pub(crate) fn build(&mut self, bounds: Rect, shapes: &Pool<Shape>) {
        self.reset();
        let root = self.alloc(bounds, 1);
        self.root = Some(root);

        self.pending.retain(Option::is_some);
        for index in 0..self.pending.len() {
            let id = self.pending[index].expect("tombstones were just compacted");
            self.reindex(root, id, shapes);
        }
    }

    /// Queue a shape; index it immediately when a tree exists.
    pub(crate) fn push(&mut self, id: ShapeId, shapes: &Pool<Shape>) {
        self.pending.push(Some(id));
        if let Some(root) = self.root {
            self.reindex(root, id, shapes);
        }
    }

    /// Tombstone a shape's pending entry; unindex it when a tree exists.
    pub(crate) fn pop(&mut self, id: ShapeId, shapes: &Pool<Shape>) {
        if let Some(slot) = self.pending.iter_mut().find(|slot| **slot == Some(id)) {
            *slot = None;
        }
        if let Some(root) = self.root {
            self.unindex(root, id, shapes);
        }
    }

    /// Breadth-first collection of every indexed shape intersecting `query`.
    ///
    /// Each shape lives at exactly one quad, so the result needs no
    /// deduplication. Returns nothing when the tree is not built.
    pub(crate) fn find(&self, query: Rect, shapes: &Pool<Shape>) -> Vec<ShapeId> {
        let mut result = Vec::new();
        let Some(root) = self.root else {
            return result;
        };

        let mut pending_quads = VecDeque::new();
        pending_quads.push_back(root);
        while let Some(quad_id) = pending_quads.pop_front() {
            let quad = self.quad(quad_id);
            for &id in &quad.shapes {
                let bounds = shapes.get(id.0).expect("dangling ShapeId in quad").bounds();
                if geom::intersects(query, bounds) {
                    result.push(id);
                }
            }
            for &quarter in quad.quarters.iter().flatten() {
                if geom::intersects(query, self.quad(quarter).bounds) {
                    pending_quads.push_back(quarter);
                }
            }
        }

        result
    }

    /// Place a shape at the deepest quad that fully contains it.
    fn reindex(&mut self, quad_id: QuadId, id: ShapeId, shapes: &Pool<Shape>) {
        let bounds = shapes.get(id.0).expect("dangling ShapeId in index").bounds();

        if self.quad(quad_id).is_leaf {
            let quad = self.quad_mut(quad_id);
            if quad.shapes.len() < MAX_SHAPES || quad.level >= MAX_LEVELS {
                quad.shapes.push(id);
                return;
            }
            self.split(quad_id, shapes);
        }

        let quad = self.quad(quad_id);
        let quarter_index = geom::nearest_corner_index(quad.bounds, bounds.center());
        let quarter_bounds = geom::quarter(quad.bounds, quad.center, quarter_index);
        let existing = quad.quarters[quarter_index];
        let level = quad.level;

        if geom::contains_rect(quarter_bounds, bounds) {
            let quarter = existing.unwrap_or_else(|| {
                let created = self.alloc(quarter_bounds, level + 1);
                self.quad_mut(quad_id).quarters[quarter_index] = Some(created);
                created
            });
            self.reindex(quarter, id, shapes);
        } else {
            // Straddles a quarter boundary; stays at this quad.
            self.quad_mut(quad_id).shapes.push(id);
        }
    }

    /// Flip a full leaf to an interior quad and re-place its residents; some
    /// descend into quarters, some stay as straddlers.
    fn split(&mut self, quad_id: QuadId, shapes: &Pool<Shape>) {
        let quad = self.quad_mut(quad_id);
        quad.is_leaf = false;
        let residents = core::mem::take(&mut quad.shapes);
        for id in residents {
            self.reindex(quad_id, id, shapes);
        }
    }

    /// Remove a shape, following the same quarter selection as insertion,
    /// and prune any quarter the removal empties.
    fn unindex(&mut self, quad_id: QuadId, id: ShapeId, shapes: &Pool<Shape>) {
        let quad = self.quad_mut(quad_id);
        if let Some(position) = quad.shapes.iter().position(|&other| other == id) {
            quad.shapes.swap_remove(position);
            return;
        }

        let bounds = shapes.get(id.0).expect("dangling ShapeId in index").bounds();
        for quarter_index in 0..geom::CORNERS {
            let Some(quarter) = self.quad(quad_id).quarters[quarter_index] else {
                continue;
            };
            if !geom::contains_rect(self.quad(quarter).bounds, bounds) {
                continue;
            }

            self.unindex(quarter, id, shapes);
            if self.is_empty_quad(quarter) {
                self.free_subtree(quarter);
                let quad = self.quad_mut(quad_id);
                quad.quarters[quarter_index] = None;
                if quad.quarters.iter().all(Option::is_none) {
                    quad.is_leaf = true;
                }
            }
        }
    }

    fn is_empty_quad(&self, id: QuadId) -> bool {
        let quad = self.quad(id);
        quad.shapes.is_empty() && (quad.is_leaf || quad.quarters.iter().all(Option::is_none))
    }

    fn quad(&self, id: QuadId) -> &Quad {
        self.quads[id].as_ref().expect("dangling quad id")
    }

    fn quad_mut(&mut self, id: QuadId) -> &mut Quad {
        self.quads[id].as_mut().expect("dangling quad id")
    }

    fn alloc(&mut self, bounds: Rect, level: usize) -> QuadId {
        let quad = Quad {
            bounds,
            center: bounds.center(),
            level,
            is_leaf: true,
            shapes: Vec::new(),
            quarters: [None; geom::CORNERS],
        };
        match self.free_list.pop() {
            Some(id) => {
                self.quads[id] = Some(quad);
                id
            }
            None => {
                self.quads.push(Some(quad));
                self.quads.len() - 1
            }
        }
    }

    /// Free a quad and its whole subtree back to the arena.
    fn free_subtree(&mut self, id: QuadId) {
        let quad = self.quads[id].take().expect("dangling quad id");
        for quarter in quad.quarters.into_iter().flatten() {
            self.free_subtree(quarter);
        }
        self.free_list.push(id);
    }

    #[cfg(test)]
    fn alive_quads(&self) -> usize {
        self.quads.iter().filter(|q| q.is_some()).count()
    }

    #[cfg(test)]
    fn deepest_level(&self) -> usize {
        self.quads
            .iter()
            .flatten()
            .map(|quad| quad.level)
            .max()
            .unwrap_or(0)
    }
}
