// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bosk Pool: a generational bucket pool with stable slot addresses.
//!
//! The pool stores values in fixed-length buckets of optional slots. Buckets
//! are created on demand and never freed, so the address of a live slot stays
//! valid for the pool's whole lifetime regardless of unrelated inserts and
//! removals. Each slot carries a generation counter that survives frees;
//! handles minted for an earlier occupant of a reused slot are detected and
//! rejected instead of silently aliasing the new value.
//!
//! - Allocation is a first-fit scan over existing buckets; a new bucket is
//!   appended only when every bucket is full.
//! - Removal clears the slot in place and makes it available for reuse.
//! - There is no compaction and no shrinking.
//!
//! # Example
//!
//! ```rust
//! use bosk_pool::Pool;
//!
//! let mut pool: Pool<u32> = Pool::new();
//! let a = pool.insert(7);
//! let b = pool.insert(8);
//! assert_eq!(pool.get(a), Some(&7));
//!
//! // Removing `a` leaves `b` untouched and makes `a` stale.
//! assert_eq!(pool.remove(a), Some(7));
//! assert_eq!(pool.get(a), None);
//! assert_eq!(pool.get(b), Some(&8));
//!
//! // The freed slot is reused, but the old handle stays stale.
//! let c = pool.insert(9);
//! assert_eq!(pool.get(a), None);
//! assert_eq!(pool.get(c), Some(&9));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Number of slots in a single bucket.
pub const BUCKET_LEN: usize = 8;

/// Generational handle for a pooled value.
///
/// A handle is a small, copyable identifier consisting of a slot address and
/// a generation counter.
///
/// ## Semantics
///
/// - On insert, the chosen slot's generation is incremented (a fresh slot
///   starts at generation `1`) and baked into the returned handle.
/// - On remove, the slot is freed; any handle pointing at it is now stale.
/// - On reuse of a freed slot, the generation increments again, so stale
///   handles never alias the new occupant.
///
/// The address encodes `bucket_index * BUCKET_LEN + slot_index`; decoding is
/// the exact inverse. `u32` is ample for practical pool sizes; behavior on
/// generation overflow is unspecified.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(addr: usize, generation: u32) -> Self {
        Self(addr as u32, generation)
    }

    const fn addr(self) -> usize {
        self.0 as usize
    }

    /// Generation the handle was minted for.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// Fixed-length run of slots with per-slot generations.
///
/// Generations persist across frees; only the value slots are cleared.
struct Bucket<T> {
    slots: [Option<T>; BUCKET_LEN],
    generations: [u32; BUCKET_LEN],
}

impl<T> Bucket<T> {
    fn new() -> Box<Self> {
        Box::new(Self {
            slots: [const { None }; BUCKET_LEN],
            generations: [0; BUCKET_LEN],
        })
    }

    fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }
}

/// A pool of values addressed by generational [`Handle`]s.
pub struct Pool<T> {
    buckets: Vec<Box<Bucket<T>>>,
    len: usize,
}

impl<T> core::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pool")
            .field("buckets", &self.buckets.len())
            .field("slots_total", &(self.buckets.len() * BUCKET_LEN))
            .field("alive", &self.len)
            .finish_non_exhaustive()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    /// Create an empty pool. Allocates no buckets until the first insert.
    pub const fn new() -> Self {
        Self {
            buckets: Vec::new(),
            len: 0,
        }
    }

    /// Insert a value into the first free slot, growing by one bucket if
    /// every existing slot is occupied. Returns a handle to the new value.
    pub fn insert(&mut self, value: T) -> Handle {
        let bucket_index = match self.buckets.iter().position(|b| b.free_slot().is_some()) {
            Some(index) => index,
            None => {
                self.buckets.push(Bucket::new());
                self.buckets.len() - 1
            }
        };

        let bucket = &mut self.buckets[bucket_index];
        let slot_index = bucket.free_slot().expect("bucket advertised a free slot");
        bucket.slots[slot_index] = Some(value);
        bucket.generations[slot_index] += 1;
        self.len += 1;

        Handle::new(
            bucket_index * BUCKET_LEN + slot_index,
            bucket.generations[slot_index],
        )
    }

    /// Remove the value the handle refers to, freeing its slot for reuse.
    ///
    /// Returns `None` for stale handles (already removed, or the slot has
    /// since been reused under a newer generation).
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let (bucket_index, slot_index) = Self::decode(handle);
        let bucket = self.buckets.get_mut(bucket_index)?;
        if bucket.generations[slot_index] != handle.generation() {
            return None;
        }
        let value = bucket.slots[slot_index].take()?;
        self.len -= 1;
        Some(value)
    }

    /// Borrow the value the handle refers to, or `None` if the handle is stale.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let (bucket_index, slot_index) = Self::decode(handle);
        let bucket = self.buckets.get(bucket_index)?;
        if bucket.generations[slot_index] != handle.generation() {
            return None;
        }
        bucket.slots[slot_index].as_ref()
    }

    /// Mutably borrow the value the handle refers to, or `None` if stale.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let (bucket_index, slot_index) = Self::decode(handle);
        let bucket = self.buckets.get_mut(bucket_index)?;
        if bucket.generations[slot_index] != handle.generation() {
            return None;
        }
        bucket.slots[slot_index].as_mut()
    }

    /// Whether the handle refers to a live value.
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no live values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn decode(handle: Handle) -> (usize, usize) {
        (handle.addr() / BUCKET_LEN, handle.addr() % BUCKET_LEN)
    }
}
