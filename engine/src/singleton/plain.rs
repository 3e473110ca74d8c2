//! Typed slots of lazily constructed singleton values.
//!
//! This module provides [`Singletons`], a container holding at most one
//! lazily constructed value per [`Singleton`] type. Slots are not tied to
//! the scene graph: they hold plain values, constructed through `Default`
//! on first access.
//!
//! # Example
//!
//! ```rust,ignore
//! use stagecraft::{Singleton, Singletons};
//!
//! #[derive(Default)]
//! struct RandomSeeds {
//!     world: u64,
//! }
//!
//! impl Singleton for RandomSeeds {
//!     fn on_init(&mut self) {
//!         self.world = 0x5eed;
//!     }
//! }
//!
//! let mut singletons = Singletons::new();
//!
//! // First access constructs the value and runs `on_init` once.
//! assert_eq!(singletons.instance::<RandomSeeds>().world, 0x5eed);
//!
//! // A subsystem reset clears every slot; the next access constructs a
//! // fresh instance.
//! singletons.reset();
//! ```

use std::{
    any::{Any, TypeId as StdTypeId},
    collections::HashMap,
};

/// A lazily constructed singleton value.
///
/// Construction goes through `Default`; [`on_init`](Singleton::on_init) runs
/// exactly once on each newly constructed instance, right after
/// construction.
///
/// # Derive Macro
///
/// Use `#[derive(Singleton)]` for types that don't override the hook:
///
/// ```rust,ignore
/// #[derive(Singleton, Default)]
/// struct FrameStats {
///     frames: u64,
/// }
/// ```
pub trait Singleton: 'static + Send + Sync + Default {
    /// Hook invoked once on a freshly constructed instance.
    fn on_init(&mut self) {}
}

/// Typed slots of lazily constructed singleton values.
///
/// Each [`Singleton`] type has at most one slot. Slots start empty, are
/// populated on first access, and are cleared as a group by [`reset`]
/// (wired to the host's subsystem (re)initialization signal).
///
/// [`reset`]: Singletons::reset
pub struct Singletons {
    slots: HashMap<StdTypeId, Box<dyn Any + Send + Sync>>,
}

impl Singletons {
    /// Create empty singleton storage.
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Get the instance for `S`, constructing it on first access.
    ///
    /// Construction runs `S::default()` followed by `on_init` exactly once.
    /// Later accesses return the cached instance untouched.
    pub fn instance<S: Singleton>(&mut self) -> &mut S {
        self.slots
            .entry(StdTypeId::of::<S>())
            .or_insert_with(|| Box::new(Self::construct::<S>()))
            .downcast_mut::<S>()
            .expect("singleton slot holds its keyed type")
    }

    /// Force (re)construction of the slot for `S`.
    ///
    /// Any previous instance is dropped; `on_init` runs on the fresh one.
    pub fn init<S: Singleton>(&mut self) -> &mut S {
        self.slots
            .insert(StdTypeId::of::<S>(), Box::new(Self::construct::<S>()));
        self.instance::<S>()
    }

    /// Peek at the instance for `S` without constructing it.
    pub fn get<S: Singleton>(&self) -> Option<&S> {
        self.slots
            .get(&StdTypeId::of::<S>())
            .and_then(|slot| slot.downcast_ref::<S>())
    }

    /// Clear every slot.
    ///
    /// The next access to each type constructs a fresh instance.
    pub fn reset(&mut self) {
        log::debug!("clearing {} singleton slot(s)", self.slots.len());
        self.slots.clear();
    }

    /// Check whether a slot for `S` is populated.
    #[inline]
    pub fn contains<S: Singleton>(&self) -> bool {
        self.slots.contains_key(&StdTypeId::of::<S>())
    }

    /// The number of populated slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether no slots are populated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn construct<S: Singleton>() -> S {
        let mut value = S::default();
        value.on_init();
        value
    }
}

impl Default for Singletons {
    fn default() -> Self {
        Self::new()
    }
}
