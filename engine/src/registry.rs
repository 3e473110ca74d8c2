//! Registry of component types known to a scene.
//!
//! This module provides [`TypeRegistry`], which assigns each component type a
//! small numeric [`TypeId`] on first registration and records metadata about
//! it ([`TypeInfo`]). The numeric ids key the per-object component maps, and
//! the recorded short names back manager/object naming and diagnostics.
//!
//! # Thread Safety
//!
//! Reads are lock-free via `DashMap`; registration takes a write lock only
//! when a type is seen for the first time. Registering the same type from
//! multiple threads yields a single id.

use std::{
    any::TypeId as StdTypeId,
    sync::{
        RwLock,
        atomic::{AtomicU32, Ordering},
    },
};

use dashmap::DashMap;

use crate::scene::Component;

/// A unique identifier for a registered component type.
///
/// Distinct from `std::any::TypeId`: ids are small sequential integers suited
/// for indexable storage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

impl TypeId {
    /// Construct a new type id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this id for use in indexable storage (e.g. Vec).
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for TypeId {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// Metadata about a registered component type.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// The registry-assigned type id.
    id: TypeId,

    /// The Rust TypeId for runtime type checking.
    type_id: StdTypeId,

    /// The short type name, used for template lookup and object naming.
    name: &'static str,
}

impl TypeInfo {
    /// Construct TypeInfo for component type `C`.
    fn new<C: Component>(id: TypeId) -> Self {
        Self {
            id,
            type_id: StdTypeId::of::<C>(),
            name: C::name(),
        }
    }

    /// Get the registry-assigned type id.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Get the Rust TypeId.
    #[inline]
    pub fn type_id(&self) -> StdTypeId {
        self.type_id
    }

    /// Get the short type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A thread-safe registry of component types.
///
/// The registry hands out one stable [`TypeId`] per component type.
/// Registration is idempotent, so call sites register freely on every attach
/// and only the first call per type pays for a write.
pub struct TypeRegistry {
    /// Map from Rust TypeId to our id. Lock-free reads via sharded concurrent hashmap.
    type_map: DashMap<StdTypeId, TypeId>,

    /// List of registered type entries. Protected by RwLock for rare writes.
    types: RwLock<Vec<Option<TypeInfo>>>,

    /// Next available type identifier.
    next_id: AtomicU32,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a new, empty type registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            type_map: DashMap::new(),
            types: RwLock::new(Vec::new()),
            next_id: AtomicU32::new(0),
        }
    }

    /// Register a component type, returning its id.
    ///
    /// If the type is already registered, the existing id is returned.
    pub fn register<C: Component>(&self) -> TypeId {
        let std_type_id = StdTypeId::of::<C>();

        // Fast path: check if already registered (lock-free read)
        if let Some(existing_id) = self.type_map.get(&std_type_id) {
            return *existing_id;
        }

        // Slow path: need to register
        // Use entry API to handle race conditions
        match self.type_map.entry(std_type_id) {
            dashmap::Entry::Occupied(occupied) => {
                // Another thread registered it first
                *occupied.get()
            }
            dashmap::Entry::Vacant(vacant) => {
                // We get to register it
                let id_value = self.next_id.fetch_add(1, Ordering::Relaxed);
                let id = TypeId(id_value);

                // Add entry to the types list
                let mut types = self.types.write().unwrap();
                let index = id_value as usize;

                // Expand if necessary
                if index >= types.len() {
                    types.resize(index + 1, None);
                }

                types[index] = Some(TypeInfo::new::<C>(id));
                vacant.insert(id);

                id
            }
        }
    }

    /// Get the id for a type, if registered.
    #[inline]
    pub fn lookup<C: Component>(&self) -> Option<TypeId> {
        self.type_map
            .get(&StdTypeId::of::<C>())
            .map(|entry| *entry.value())
    }

    /// Get type info by id.
    #[inline]
    pub fn info(&self, id: TypeId) -> Option<TypeInfo> {
        let types = self.types.read().unwrap();
        types.get(id.index()).and_then(|opt| *opt)
    }

    /// Get the recorded short name for a registered type id.
    #[inline]
    pub fn name(&self, id: TypeId) -> Option<&'static str> {
        self.info(id).map(|info| info.name())
    }

    /// Get the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.next_id.load(Ordering::Relaxed) as usize
    }

    /// Check if the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    struct Position {
        #[allow(dead_code)]
        x: f32,
        #[allow(dead_code)]
        y: f32,
    }
    impl Component for Position {}

    struct Velocity {
        #[allow(dead_code)]
        dx: f32,
        #[allow(dead_code)]
        dy: f32,
    }
    impl Component for Velocity {}

    // ==================== Basic Registration ====================

    #[test]
    fn register_assigns_sequential_ids() {
        // Given
        let registry = TypeRegistry::new();

        // When
        let pos_id = registry.register::<Position>();
        let vel_id = registry.register::<Velocity>();

        // Then
        assert_ne!(pos_id, vel_id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn register_is_idempotent() {
        let registry = TypeRegistry::new();

        let first = registry.register::<Position>();
        let second = registry.register::<Position>();

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    // ==================== Lookup ====================

    #[test]
    fn lookup_returns_none_for_unregistered() {
        let registry = TypeRegistry::new();

        assert!(registry.lookup::<Position>().is_none());
    }

    #[test]
    fn lookup_returns_registered_id() {
        let registry = TypeRegistry::new();
        let id = registry.register::<Position>();

        assert_eq!(registry.lookup::<Position>(), Some(id));
    }

    // ==================== Info ====================

    #[test]
    fn info_records_short_name() {
        let registry = TypeRegistry::new();
        let id = registry.register::<Position>();

        let info = registry.info(id).unwrap();

        assert_eq!(info.id(), id);
        assert_eq!(info.name(), "Position");
        assert_eq!(registry.name(id), Some("Position"));
    }

    #[test]
    fn info_returns_none_for_unknown_id() {
        let registry = TypeRegistry::new();

        assert!(registry.info(TypeId::new(7)).is_none());
    }

    // ==================== Concurrency ====================

    #[test]
    fn concurrent_registration_yields_one_id() {
        let registry = Arc::new(TypeRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.register::<Position>())
            })
            .collect();

        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(registry.len(), 1);
    }
}
