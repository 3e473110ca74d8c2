//! Singleton access helpers.
//!
//! Three flavors of lazily resolved, type-keyed access, all owned
//! explicitly by the caller rather than by hidden statics:
//!
//! | Flavor | Backing | Creates? | Reset behavior |
//! |--------|---------|----------|----------------|
//! | [`Singletons`] | plain values | constructs via `Default` | [`reset`](Singletons::reset) clears all slots |
//! | [`Bindings`] | scene search | never | stale handles re-resolve |
//! | [`Managers`] | scene search + creation | object + component | [`Lifecycle`](crate::lifecycle::Lifecycle) flags |

mod bound;
mod manager;
mod plain;

pub use bound::Bindings;
pub use manager::{Manager, Managers};
pub use plain::{Singleton, Singletons};
