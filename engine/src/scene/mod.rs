//! The scene-object graph.
//!
//! A [`Scene`] is the central container for runtime objects and their
//! components. It provides the primary API for creating and destroying
//! objects, attaching and querying components by type, and instantiating
//! [`Template`]s into new objects.
//!
//! # Architecture
//!
//! The scene coordinates a few pieces:
//! - **Allocator**: hands out generation-tagged [`ObjectId`] handles and
//!   recycles freed slots
//! - **Type registry**: assigns numeric ids to component types on first
//!   attach
//! - **Slots**: one entry per object, holding its name and component map
//! - **Liveness bitset**: tracks occupied slots so queries skip tombstones
//!
//! # Example
//!
//! ```rust,ignore
//! use stagecraft::{Component, Scene};
//!
//! #[derive(Component)]
//! struct Health { points: u32 }
//!
//! let mut scene = Scene::new();
//!
//! let hero = scene.create("Hero");
//! scene.attach(hero, Health { points: 100 });
//!
//! // Resolve by type
//! let found = scene.find_first::<Health>();
//! assert_eq!(found, Some(hero));
//!
//! scene.destroy(hero);
//! // The handle is now stale: every lookup misses.
//! assert!(scene.get::<Health>(hero).is_none());
//! ```

mod components;
mod object;

use fixedbitset::FixedBitSet;

pub use components::Component;
pub use object::{Generation, Id, ObjectId};

use crate::{
    registry::TypeRegistry,
    scene::{components::ComponentMap, object::Allocator},
    template::Template,
};

/// A scene object: its handle, display name, and attached components.
struct Object {
    /// The handle this slot was populated under, kept for staleness checks.
    handle: ObjectId,

    /// The object's display name.
    name: String,

    /// The object's attached components.
    components: ComponentMap,
}

/// The scene-object graph: every live object, its name, and its components.
///
/// All accessors validate the handle's generation against the slot, so
/// handles to destroyed objects consistently miss instead of observing the
/// slot's next occupant.
pub struct Scene {
    /// The registry of component types seen by this scene.
    registry: TypeRegistry,

    /// The scene's object handle allocator.
    allocator: Allocator,

    /// Object slots, indexed by handle slot id.
    slots: Vec<Option<Object>>,

    /// Occupied slots, used by queries to skip tombstones.
    live: FixedBitSet,
}

impl Scene {
    /// Create a new, empty scene.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            allocator: Allocator::new(),
            slots: Vec::new(),
            live: FixedBitSet::new(),
        }
    }

    /// Create a new, empty scene object with the given name.
    pub fn create(&mut self, name: impl Into<String>) -> ObjectId {
        let handle = self.allocator.alloc();
        let index = handle.index();

        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
            self.live.grow(index + 1);
        }

        let name = name.into();
        log::trace!("create object {handle:?} '{name}'");

        self.slots[index] = Some(Object {
            handle,
            name,
            components: ComponentMap::new(),
        });
        self.live.insert(index);

        handle
    }

    /// Destroy the given scene object, dropping its components.
    ///
    /// Returns `false` if the handle is stale or was never created. The
    /// slot becomes available for reuse at the next generation.
    pub fn destroy(&mut self, object: ObjectId) -> bool {
        if self.slot(object).is_none() {
            return false;
        }

        log::trace!("destroy object {object:?}");

        let index = object.index();
        self.slots[index] = None;
        self.live.set(index, false);
        self.allocator.free(object);

        true
    }

    /// Check whether the handle refers to a live object.
    #[inline]
    pub fn is_alive(&self, object: ObjectId) -> bool {
        self.slot(object).is_some()
    }

    /// Get the name of a live object.
    pub fn name(&self, object: ObjectId) -> Option<&str> {
        self.slot(object).map(|obj| obj.name.as_str())
    }

    /// Rename a live object.
    ///
    /// Returns `false` if the handle is stale.
    pub fn rename(&mut self, object: ObjectId, name: impl Into<String>) -> bool {
        match self.slot_mut(object) {
            Some(obj) => {
                obj.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Attach a component to a live object.
    ///
    /// Registers the component type on first use. Returns `false` if the
    /// object is not alive or already carries a component of this type.
    pub fn attach<C: Component>(&mut self, object: ObjectId, component: C) -> bool {
        let id = self.registry.register::<C>();
        match self.slot_mut(object) {
            Some(obj) if !obj.components.contains(id) => {
                obj.components.insert(id, component);
                true
            }
            _ => false,
        }
    }

    /// Detach a component from an object, returning it if it was attached.
    pub fn detach<C: Component>(&mut self, object: ObjectId) -> Option<C> {
        let id = self.registry.lookup::<C>()?;
        self.slot_mut(object)?.components.remove(id)
    }

    /// Get a reference to an object's component of type `C`.
    pub fn get<C: Component>(&self, object: ObjectId) -> Option<&C> {
        let id = self.registry.lookup::<C>()?;
        self.slot(object)?.components.get(id)
    }

    /// Get a mutable reference to an object's component of type `C`.
    pub fn get_mut<C: Component>(&mut self, object: ObjectId) -> Option<&mut C> {
        let id = self.registry.lookup::<C>()?;
        self.slot_mut(object)?.components.get_mut(id)
    }

    /// Check whether an object is alive and carries a component of type `C`.
    pub fn has<C: Component>(&self, object: ObjectId) -> bool {
        let Some(id) = self.registry.lookup::<C>() else {
            return false;
        };
        self.slot(object)
            .is_some_and(|obj| obj.components.contains(id))
    }

    /// Find the first live object carrying a component of type `C`.
    ///
    /// Objects are visited in slot order: creation order, except where a
    /// destroyed object's slot has been reused.
    pub fn find_first<C: Component>(&self) -> Option<ObjectId> {
        let id = self.registry.lookup::<C>()?;
        self.live.ones().find_map(|index| {
            let obj = self.slots[index].as_ref()?;
            obj.components.contains(id).then_some(obj.handle)
        })
    }

    /// Instantiate a template into the scene.
    ///
    /// The new object is named `<template name>(Clone)` and carries a clone
    /// of each of the template's prototype components.
    pub fn instantiate(&mut self, template: &Template) -> ObjectId {
        let object = self.create(format!("{}(Clone)", template.name()));
        template.build(self, object);
        object
    }

    /// The number of live objects in the scene.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.count_ones(..)
    }

    /// Check whether the scene has no live objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The registry of component types known to this scene.
    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Get the slot for a handle, if the handle is still current.
    fn slot(&self, object: ObjectId) -> Option<&Object> {
        self.slots
            .get(object.index())
            .and_then(|slot| slot.as_ref())
            .filter(|obj| obj.handle == object)
    }

    /// Get the slot for a handle mutably, if the handle is still current.
    fn slot_mut(&mut self, object: ObjectId) -> Option<&mut Object> {
        self.slots
            .get_mut(object.index())
            .and_then(|slot| slot.as_mut())
            .filter(|obj| obj.handle == object)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
