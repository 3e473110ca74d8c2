//! Cached find-only scene lookups.
//!
//! This module provides [`Bindings`], a cache over "find the first object
//! carrying `C`" scene queries for components expected to exist at most
//! once. Bindings never create objects: a type with no live carrier simply
//! resolves to nothing, access after access, until a carrier appears.

use std::{any::TypeId as StdTypeId, collections::HashMap};

use crate::scene::{Component, ObjectId, Scene};

/// Cached scene lookups for components expected to exist at most once.
///
/// A binding resolves `C` by searching the scene for the first live object
/// carrying it, then caches the handle. A cached handle invalidated by
/// destruction or detachment is transparently re-resolved on the next
/// access; [`init`](Bindings::init) forces re-resolution even while the
/// cached handle is still valid.
pub struct Bindings {
    cache: HashMap<StdTypeId, ObjectId>,
}

impl Bindings {
    /// Create an empty binding cache.
    #[inline]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Get the bound instance of `C`, resolving by scene search when the
    /// cached handle is unset or no longer valid.
    pub fn instance<'s, C: Component>(&mut self, scene: &'s Scene) -> Option<&'s C> {
        let object = self.resolve::<C>(scene)?;
        scene.get::<C>(object)
    }

    /// Get the bound object handle for `C`, resolving when needed.
    pub fn resolve<C: Component>(&mut self, scene: &Scene) -> Option<ObjectId> {
        if let Some(cached) = self.cache.get(&StdTypeId::of::<C>()).copied()
            && scene.has::<C>(cached)
        {
            return Some(cached);
        }
        self.init::<C>(scene)
    }

    /// Force re-resolution by scene search, re-caching the result.
    ///
    /// A miss leaves the slot unset, so later accesses search again.
    pub fn init<C: Component>(&mut self, scene: &Scene) -> Option<ObjectId> {
        let ty = StdTypeId::of::<C>();
        match scene.find_first::<C>() {
            Some(object) => {
                self.cache.insert(ty, object);
                Some(object)
            }
            None => {
                self.cache.remove(&ty);
                None
            }
        }
    }

    /// The cached handle for `C`, if set. Performs no resolution.
    pub fn cached<C: Component>(&self) -> Option<ObjectId> {
        self.cache.get(&StdTypeId::of::<C>()).copied()
    }

    /// Drop every cached handle.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use stagecraft_macros::Component;

    use super::*;

    #[derive(Component, Debug, PartialEq)]
    struct Hud {
        visible: bool,
    }

    // ==================== Resolution ====================

    #[test]
    fn instance_returns_none_without_carrier() {
        let mut bindings = Bindings::new();
        let scene = Scene::new();

        assert!(bindings.instance::<Hud>(&scene).is_none());
        assert!(bindings.instance::<Hud>(&scene).is_none());
    }

    #[test]
    fn instance_never_creates_objects() {
        let mut bindings = Bindings::new();
        let scene = Scene::new();

        bindings.instance::<Hud>(&scene);
        bindings.instance::<Hud>(&scene);

        assert!(scene.is_empty());
    }

    #[test]
    fn instance_finds_carrier_once_it_appears() {
        let mut bindings = Bindings::new();
        let mut scene = Scene::new();

        assert!(bindings.instance::<Hud>(&scene).is_none());

        let overlay = scene.create("Overlay");
        scene.attach(overlay, Hud { visible: true });

        assert_eq!(
            bindings.instance::<Hud>(&scene),
            Some(&Hud { visible: true })
        );
        assert_eq!(bindings.cached::<Hud>(), Some(overlay));
    }

    #[test]
    fn instance_reuses_cached_handle() {
        let mut bindings = Bindings::new();
        let mut scene = Scene::new();
        let first = scene.create("First");
        scene.attach(first, Hud { visible: true });

        assert_eq!(bindings.resolve::<Hud>(&scene), Some(first));

        // A second carrier does not steal the binding while the cached
        // handle stays valid.
        let second = scene.create("Second");
        scene.attach(second, Hud { visible: false });

        assert_eq!(bindings.resolve::<Hud>(&scene), Some(first));
    }

    // ==================== Invalidation ====================

    #[test]
    fn destroyed_carrier_is_reresolved() {
        let mut bindings = Bindings::new();
        let mut scene = Scene::new();
        let first = scene.create("First");
        let second = scene.create("Second");
        scene.attach(first, Hud { visible: true });
        scene.attach(second, Hud { visible: false });

        assert_eq!(bindings.resolve::<Hud>(&scene), Some(first));

        scene.destroy(first);

        assert_eq!(bindings.resolve::<Hud>(&scene), Some(second));
    }

    #[test]
    fn detached_carrier_is_reresolved() {
        let mut bindings = Bindings::new();
        let mut scene = Scene::new();
        let carrier = scene.create("Carrier");
        scene.attach(carrier, Hud { visible: true });

        assert_eq!(bindings.resolve::<Hud>(&scene), Some(carrier));

        scene.detach::<Hud>(carrier);

        assert!(bindings.resolve::<Hud>(&scene).is_none());
        assert!(bindings.cached::<Hud>().is_none());
    }

    // ==================== Explicit Init ====================

    #[test]
    fn init_rebinds_to_current_first_carrier() {
        let mut bindings = Bindings::new();
        let mut scene = Scene::new();

        // Bind to the only carrier, living in slot 1.
        let filler = scene.create("Filler");
        let late = scene.create("Late");
        scene.attach(late, Hud { visible: false });
        assert_eq!(bindings.resolve::<Hud>(&scene), Some(late));

        // A new carrier takes over slot 0. Plain access keeps the valid
        // cache; init re-runs the search and rebinds to the earlier slot.
        scene.destroy(filler);
        let early = scene.create("Early");
        scene.attach(early, Hud { visible: true });

        assert_eq!(bindings.resolve::<Hud>(&scene), Some(late));
        assert_eq!(bindings.init::<Hud>(&scene), Some(early));
    }

    #[test]
    fn clear_drops_cached_handles() {
        let mut bindings = Bindings::new();
        let mut scene = Scene::new();
        let carrier = scene.create("Carrier");
        scene.attach(carrier, Hud { visible: true });
        bindings.resolve::<Hud>(&scene);

        bindings.clear();

        assert!(bindings.cached::<Hud>().is_none());
    }
}
