//! Named object templates.
//!
//! A [`Template`] is a pre-authored blueprint for a scene object: a name
//! plus a list of prototype components. [`Templates`] stores them by name,
//! forming the engine's "load blueprint by name" surface. Instantiation goes
//! through [`Scene::instantiate`](crate::scene::Scene::instantiate), which
//! names the new object `<name>(Clone)` and attaches a clone of each
//! prototype.
//!
//! Manager resolution looks templates up by the manager's short type name,
//! so a template registered as `"AudioMixer"` pre-authors the object created
//! for a manager type `AudioMixer`.

use std::collections::HashMap;

use crate::scene::{Component, ObjectId, Scene};

/// A builder closure cloning one prototype component onto an object.
type Builder = Box<dyn Fn(&mut Scene, ObjectId) + Send + Sync>;

/// A named blueprint for a scene object.
pub struct Template {
    /// The template's name, matched against manager short type names.
    name: String,

    /// Prototype builders, applied in registration order.
    builders: Vec<Builder>,
}

impl Template {
    /// Create an empty template with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            builders: Vec::new(),
        }
    }

    /// Add a prototype component. Every instantiated object receives its own
    /// clone.
    pub fn with<C: Component + Clone>(mut self, prototype: C) -> Self {
        self.builders.push(Box::new(move |scene, object| {
            scene.attach(object, prototype.clone());
        }));
        self
    }

    /// The template's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach clones of the prototype components to the given object.
    pub(crate) fn build(&self, scene: &mut Scene, object: ObjectId) {
        for builder in &self.builders {
            builder(scene, object);
        }
    }
}

/// Name-keyed storage for templates.
pub struct Templates {
    templates: HashMap<String, Template>,
}

impl Templates {
    /// Create a new, empty template store.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Register a template under its name.
    ///
    /// A template registered under an already-used name replaces the
    /// previous one.
    pub fn register(&mut self, template: Template) {
        if self.templates.contains_key(template.name()) {
            log::warn!("replacing template '{}'", template.name());
        }
        self.templates
            .insert(template.name().to_string(), template);
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Check whether a template with the given name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// The number of registered templates.
    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check whether no templates are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use stagecraft_macros::Component;

    use super::*;

    #[derive(Component, Debug, PartialEq, Clone)]
    struct Health {
        points: u32,
    }

    // ==================== Template ====================

    #[test]
    fn template_records_name() {
        let template = Template::new("Enemy");

        assert_eq!(template.name(), "Enemy");
    }

    #[test]
    fn build_attaches_prototype_clones() {
        let mut scene = Scene::new();
        let object = scene.create("Enemy");
        let template = Template::new("Enemy").with(Health { points: 20 });

        template.build(&mut scene, object);

        assert_eq!(scene.get::<Health>(object), Some(&Health { points: 20 }));
    }

    // ==================== Templates ====================

    #[test]
    fn new_creates_empty_store() {
        let templates = Templates::new();

        assert!(templates.is_empty());
        assert!(!templates.contains("Enemy"));
    }

    #[test]
    fn register_stores_template_by_name() {
        let mut templates = Templates::new();

        templates.register(Template::new("Enemy"));

        assert!(templates.contains("Enemy"));
        assert!(templates.get("Enemy").is_some());
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn register_replaces_same_name() {
        let mut templates = Templates::new();
        templates.register(Template::new("Enemy"));

        templates.register(Template::new("Enemy").with(Health { points: 7 }));

        assert_eq!(templates.len(), 1);

        let mut scene = Scene::new();
        let object = scene.instantiate(templates.get("Enemy").unwrap());
        assert_eq!(scene.get::<Health>(object), Some(&Health { points: 7 }));
    }

    #[test]
    fn get_returns_none_for_unknown_name() {
        let templates = Templates::new();

        assert!(templates.get("Missing").is_none());
    }
}
