//! Singleton access helpers for a scene-object component framework.
//!
//! The crate centers on three access components, each a typed registry
//! keyed by type identity instead of the usual hidden statics:
//!
//! - [`Singletons`]: lazily default-constructed plain values with a one-time
//!   [`Singleton::on_init`] hook and a group-wide reset
//! - [`Bindings`]: cached find-only lookups of components living somewhere
//!   in the scene
//! - [`Managers`]: find-or-create resolution of scene-wide manager
//!   components, honoring the shared [`Lifecycle`] reset/teardown flags
//!
//! Backing them are the host-side collaborators: the [`Scene`] object graph,
//! the name-keyed [`Template`] store, and the per-scene component
//! [`TypeRegistry`].
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
//! impl Manager for GameDirector {}
//!
//! let mut scene = Scene::new();
//! let templates = Templates::new();
//! let mut lifecycle = Lifecycle::new();
//! let mut managers = Managers::new();
//!
//! // The engine fires its subsystem signal once at load.
//! lifecycle.subsystem_reset();
//!
//! // First access finds no carrier and no template, so a bare object
//! // named "[GameDirector]" is created with the component attached.
//! let director = managers.resolve::<GameDirector>(&mut scene, &templates, &mut lifecycle);
//! assert!(director.is_some());
//! ```

// Allow the derive macros' `::stagecraft::...` paths to resolve from within
// this crate.
extern crate self as stagecraft;

pub mod lifecycle;
pub mod registry;
pub mod scene;
pub mod singleton;
pub mod template;

pub(crate) mod util;

pub use lifecycle::Lifecycle;
pub use registry::{TypeId, TypeInfo, TypeRegistry};
pub use scene::{Component, ObjectId, Scene};
pub use singleton::{Bindings, Manager, Managers, Singleton, Singletons};
pub use template::{Template, Templates};

pub use stagecraft_macros::{Component, Singleton};
