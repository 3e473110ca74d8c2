//! Scene object handles and allocation.
//!
//! Scene objects are addressed through [`ObjectId`], a handle combining a
//! slot [`Id`] with a [`Generation`]. The id names a slot in the scene; the
//! generation tracks how many times that slot has been reused. Handles to
//! destroyed objects keep their old generation and therefore never alias the
//! slot's next occupant:
//!
//! ```rust,ignore
//! let object = allocator.alloc(); // ObjectId { id: 0, generation: 0 }
//! allocator.free(object);
//! let reused = allocator.alloc(); // ObjectId { id: 0, generation: 1 }
//! // The original handle is now stale and fails every scene lookup.
//! ```
//!
//! Freed slots are recycled through a dead pool, keeping the id space compact
//! for the scene's slot vector.

use std::sync::atomic::{AtomicU32, Ordering};

use crossbeam::queue::SegQueue;

/// The generation of a scene object slot. Incremented each time the slot's
/// object is destroyed, invalidating outstanding handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The first generation of a slot.
    const FIRST: Self = Self(0);

    /// Get the next generation from the current.
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// A slot identifier for a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A handle to a scene object.
///
/// Uniquely identifies an object for its whole lifetime. A scene holds at
/// most one live object per `id`; the `generation` distinguishes the current
/// occupant of the slot from previous, destroyed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    /// The slot identifier of the object.
    id: Id,

    /// The generation of the object.
    generation: Generation,
}

impl ObjectId {
    /// Construct a handle with just an id, defaulting to the first generation.
    #[inline]
    pub(crate) fn new(id: impl Into<Id>) -> Self {
        Self::new_with_generation(id.into(), Generation::FIRST)
    }

    /// Construct a handle with an id and a known generation.
    #[inline]
    pub(crate) const fn new_with_generation(id: Id, generation: Generation) -> Self {
        Self { id, generation }
    }

    /// Get the slot id of this handle.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the generation of this handle.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Get the index of this handle for use in indexable storage (e.g. Vec).
    #[inline]
    pub fn index(&self) -> usize {
        self.id.0 as usize
    }

    /// Get a handle for the same slot at the next generation.
    #[inline]
    pub(crate) fn genned(&self) -> Self {
        Self::new_with_generation(self.id, self.generation.next())
    }
}

/// An allocator for scene object handles.
///
/// Allocates unique slot ids and recycles freed slots to keep the id space
/// compact. When an object is freed, its handle is returned to the dead pool
/// with the generation advanced, invalidating any stale references.
#[derive(Default, Debug)]
pub(crate) struct Allocator {
    /// Pool of handles available for reuse, generation already advanced.
    dead_pool: SegQueue<ObjectId>,

    /// Next fresh slot id to allocate.
    next_id: AtomicU32,
}

impl Allocator {
    /// Construct a new allocator starting from slot 0.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            dead_pool: SegQueue::new(),
            next_id: AtomicU32::new(0),
        }
    }

    /// Allocate a handle, reusing a freed slot when one is available.
    pub(crate) fn alloc(&self) -> ObjectId {
        // Try to reuse from dead pool first
        if let Some(recycled) = self.dead_pool.pop() {
            return recycled;
        }

        // Allocate fresh slot
        ObjectId::new(Id(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }

    /// Free a handle for reuse with its generation advanced.
    pub(crate) fn free(&self, object: ObjectId) {
        self.dead_pool.push(object.genned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_yields_unique_handles() {
        // Given
        let allocator = Allocator::new();

        // When
        let handles: Vec<_> = (0..100).map(|_| allocator.alloc()).collect();

        // Then
        for (i, a) in handles.iter().enumerate() {
            for b in &handles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn freed_slot_is_reused_with_next_generation() {
        // Given
        let allocator = Allocator::new();
        let first = allocator.alloc();

        // When
        allocator.free(first);
        let reused = allocator.alloc();

        // Then
        assert_eq!(first.id(), reused.id());
        assert_eq!(first.generation().next(), reused.generation());
        assert_ne!(first, reused);
    }

    #[test]
    fn fresh_ids_are_sequential_indices() {
        let allocator = Allocator::new();

        let a = allocator.alloc();
        let b = allocator.alloc();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }
}
