//! Name-indexed store of accepted classes

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

use super::{markers, ClassBuilder, ContractError};
use crate::class::ClassDef;

/// Keeps accepted classes by name. Rejected definitions never enter it.
pub struct ClassRegistry {
    classes: RwLock<FxHashMap<String, Arc<ClassDef>>>,
}

impl ClassRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            classes: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a registry that already knows the policy marker roots
    pub fn with_markers() -> Self {
        let registry = Self::new();
        for marker in markers::all() {
            registry.register(marker);
        }
        registry
    }

    /// Build `builder` and keep the class if it is accepted
    pub fn define(&self, builder: ClassBuilder) -> Result<Arc<ClassDef>, ContractError> {
        let class = builder.build()?;
        self.register(Arc::clone(&class));
        Ok(class)
    }

    /// Bind an accepted class under its name, returning the class it replaces
    pub fn register(&self, class: Arc<ClassDef>) -> Option<Arc<ClassDef>> {
        let name = class.name().to_string();
        let previous = self.classes.write().insert(name.clone(), class);
        if previous.is_some() {
            debug!("Redefined class {}", name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<Arc<ClassDef>> {
        self.classes.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.read().contains_key(name)
    }

    /// Registered class names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// Process-wide registry, seeded with the marker roots
    pub fn global() -> &'static Self {
        static INSTANCE: std::sync::OnceLock<ClassRegistry> = std::sync::OnceLock::new();
        INSTANCE.get_or_init(ClassRegistry::with_markers)
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
