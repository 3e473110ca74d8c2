//! Shared lifecycle flags for manager resolution.
//!
//! The host engine drives two notifications into a [`Lifecycle`] value: a
//! subsystem (re)initialization signal fired once at a defined early load
//! phase, and a teardown signal when a manager-hosting object is destroyed
//! (reported through
//! [`Managers::object_destroyed`](crate::singleton::Managers::object_destroyed)).
//!
//! The flags are shared by every manager resolution in a context, never
//! tracked per manager type: one reset re-resolves all managers, and one
//! teardown refuses all creation until the next reset.

/// Lifecycle state shared by all manager resolutions in a context.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    /// Forces the next resolution to re-resolve regardless of cached state.
    reset: bool,

    /// Refuses manager creation while the scene is being torn down.
    destroying: bool,
}

impl Lifecycle {
    /// Create lifecycle state with both flags clear.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the host's subsystem (re)initialization signal.
    ///
    /// Marks every cached manager stale and re-arms creation after a
    /// teardown.
    pub fn subsystem_reset(&mut self) {
        log::debug!("subsystem reset");
        self.reset = true;
        self.destroying = false;
    }

    /// Enter the destroying window: manager resolution returns nothing and
    /// creation is refused until the next subsystem reset.
    pub fn mark_destroying(&mut self) {
        self.destroying = true;
    }

    /// Whether the next resolution must re-resolve.
    #[inline]
    pub fn needs_reset(&self) -> bool {
        self.reset
    }

    /// Whether the context is in its destroying window.
    #[inline]
    pub fn is_destroying(&self) -> bool {
        self.destroying
    }

    /// Clear the reset flag once a resolution pass has run.
    pub(crate) fn clear_reset(&mut self) {
        self.reset = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_with_both_flags_clear() {
        let lifecycle = Lifecycle::new();

        assert!(!lifecycle.needs_reset());
        assert!(!lifecycle.is_destroying());
    }

    #[test]
    fn subsystem_reset_arms_reset_and_clears_destroying() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.mark_destroying();

        lifecycle.subsystem_reset();

        assert!(lifecycle.needs_reset());
        assert!(!lifecycle.is_destroying());
    }

    #[test]
    fn mark_destroying_sets_flag() {
        let mut lifecycle = Lifecycle::new();

        lifecycle.mark_destroying();

        assert!(lifecycle.is_destroying());
    }

    #[test]
    fn clear_reset_only_clears_reset() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.subsystem_reset();
        lifecycle.mark_destroying();

        lifecycle.clear_reset();

        assert!(!lifecycle.needs_reset());
        assert!(lifecycle.is_destroying());
    }
}
