//! Find-or-create manager resolution.
//!
//! This module provides [`Managers`], which resolves scene-wide manager
//! components on demand. Resolution searches the scene for a live carrier
//! first and falls back to creating one: from the template named after the
//! manager type when one is registered, otherwise as a bare object named
//! `[TypeName]`.
//!
//! # Lifecycle
//!
//! Resolution reads the shared [`Lifecycle`] flags:
//! - a pending subsystem reset forces re-resolution (and re-creation) of
//!   every manager on its next access, then clears
//! - the destroying window makes every access return nothing, so managers
//!   are never resurrected mid-teardown
//!
//! # Example
//!
//! ```rust,ignore
//! use stagecraft::{Component, Lifecycle, Manager, Managers, Scene, Templates};
//!
//! #[derive(Component, Default)]
//! struct GameDirector {
//!     level: u32,
//! }
//!
//! impl Manager for GameDirector {
//!     fn init(&mut self) {
//!         self.level = 1;
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let templates = Templates::new();
//! let mut lifecycle = Lifecycle::new();
//! let mut managers = Managers::new();
//!
//! // No carrier in scene and no "GameDirector" template: a bare object
//! // named "[GameDirector]" is created and the component attached.
//! managers.bootstrap::<GameDirector>(&mut scene, &templates, &mut lifecycle);
//! ```

use std::{any::TypeId as StdTypeId, collections::HashMap};

use crate::{
    lifecycle::Lifecycle,
    scene::{Component, ObjectId, Scene},
    template::Templates,
};

/// A component resolved as a scene-wide manager.
///
/// Managers are found or created on demand through [`Managers`]. The
/// `Default` bound supplies the component attached to newly created manager
/// objects; [`init`](Manager::init) is the bootstrap hook, a no-op unless
/// overridden.
pub trait Manager: Component + Default {
    /// Hook invoked by [`Managers::bootstrap`] on the resolved instance.
    fn init(&mut self) {}
}

/// Find-or-create resolution of scene-wide manager components.
///
/// Caches one resolved object handle per manager type. Cache validity is
/// checked on every access: a destroyed object or detached component makes
/// the slot count as empty.
pub struct Managers {
    cache: HashMap<StdTypeId, ObjectId>,
}

impl Managers {
    /// Create an empty manager cache.
    #[inline]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Resolve the manager object for `M`.
    ///
    /// Returns `None` for every call made during the destroying window,
    /// regardless of cached state. Otherwise: a valid cached handle is
    /// returned as-is unless a subsystem reset is pending; resolution
    /// searches the scene first and falls back to creation, and when the
    /// reset flag was set the creation outcome is adopted even over a
    /// successful search. The reset flag is cleared once resolution has
    /// run.
    pub fn resolve<M: Manager>(
        &mut self,
        scene: &mut Scene,
        templates: &Templates,
        lifecycle: &mut Lifecycle,
    ) -> Option<ObjectId> {
        if lifecycle.is_destroying() {
            return None;
        }

        let ty = StdTypeId::of::<M>();
        let reset = lifecycle.needs_reset();

        let mut slot = self
            .cache
            .get(&ty)
            .copied()
            .filter(|cached| scene.has::<M>(*cached));

        if reset || slot.is_none() {
            slot = scene.find_first::<M>();
        }
        let object = match slot {
            Some(found) if !reset => found,
            _ => create_manager::<M>(scene, templates),
        };
        lifecycle.clear_reset();

        self.cache.insert(ty, object);
        Some(object)
    }

    /// Get the resolved manager instance for `M`.
    pub fn instance<'s, M: Manager>(
        &mut self,
        scene: &'s mut Scene,
        templates: &Templates,
        lifecycle: &mut Lifecycle,
    ) -> Option<&'s M> {
        let object = self.resolve::<M>(scene, templates, lifecycle)?;
        scene.get::<M>(object)
    }

    /// Get the resolved manager instance for `M`, mutably.
    pub fn instance_mut<'s, M: Manager>(
        &mut self,
        scene: &'s mut Scene,
        templates: &Templates,
        lifecycle: &mut Lifecycle,
    ) -> Option<&'s mut M> {
        let object = self.resolve::<M>(scene, templates, lifecycle)?;
        scene.get_mut::<M>(object)
    }

    /// Resolve `M` once and run its [`init`](Manager::init) hook on the
    /// resolved instance.
    ///
    /// Returns the manager object handle, or `None` when resolution came up
    /// empty (e.g. during the destroying window).
    pub fn bootstrap<M: Manager>(
        &mut self,
        scene: &mut Scene,
        templates: &Templates,
        lifecycle: &mut Lifecycle,
    ) -> Option<ObjectId> {
        let object = self.resolve::<M>(scene, templates, lifecycle)?;
        scene.get_mut::<M>(object)?.init();
        Some(object)
    }

    /// Report destruction of a scene object.
    ///
    /// If the object is a known manager host, the shared destroying flag is
    /// set: every resolution returns nothing until the next subsystem
    /// reset.
    pub fn object_destroyed(&self, object: ObjectId, lifecycle: &mut Lifecycle) {
        if self.cache.values().any(|cached| *cached == object) {
            lifecycle.mark_destroying();
        }
    }

    /// The cached manager object for `M`, if any. Performs no resolution.
    pub fn cached<M: Manager>(&self) -> Option<ObjectId> {
        self.cache.get(&StdTypeId::of::<M>()).copied()
    }

    /// Drop every cached handle.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for Managers {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the scene object hosting manager `M`.
///
/// Instantiates the template named after `M` when one is registered,
/// otherwise creates a bare object named `[TypeName]`. The engine's clone
/// suffix is stripped from the object's name, and `M::default()` is
/// attached unless the object already carries the component.
fn create_manager<M: Manager>(scene: &mut Scene, templates: &Templates) -> ObjectId {
    let name = M::name();

    let object = match templates.get(name) {
        Some(template) => scene.instantiate(template),
        None => scene.create(format!("[{name}]")),
    };

    if let Some(cleaned) = scene
        .name(object)
        .filter(|current| current.contains("(Clone)"))
        .map(|current| current.replace("(Clone)", ""))
    {
        scene.rename(object, cleaned);
    }

    if !scene.has::<M>(object) {
        scene.attach(object, M::default());
    }

    log::debug!("created manager '{name}' as {object:?}");
    object
}
