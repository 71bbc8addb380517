//! Root classes that bind a policy through inheritance
//!
//! Deriving from [`strong_base`] or [`safe_base`] opts a hierarchy into that
//! policy without naming it on every class.

use std::sync::{Arc, OnceLock};

use super::Policy;
use crate::class::ClassDef;

pub const WEAK_BASE: &str = "WeakBase";
pub const STRONG_BASE: &str = "StrongBase";
pub const SAFE_BASE: &str = "SafeBase";

static WEAK: OnceLock<Arc<ClassDef>> = OnceLock::new();
static STRONG: OnceLock<Arc<ClassDef>> = OnceLock::new();
static SAFE: OnceLock<Arc<ClassDef>> = OnceLock::new();

pub fn weak_base() -> Arc<ClassDef> {
    Arc::clone(WEAK.get_or_init(|| Arc::new(ClassDef::root(WEAK_BASE, Policy::Weak))))
}

pub fn strong_base() -> Arc<ClassDef> {
    Arc::clone(STRONG.get_or_init(|| Arc::new(ClassDef::root(STRONG_BASE, Policy::Strong))))
}

pub fn safe_base() -> Arc<ClassDef> {
    Arc::clone(SAFE.get_or_init(|| Arc::new(ClassDef::root(SAFE_BASE, Policy::Safe))))
}

/// Marker class for `policy`
pub fn marker(policy: Policy) -> Arc<ClassDef> {
    match policy {
        Policy::Weak => weak_base(),
        Policy::Strong => strong_base(),
        Policy::Safe => safe_base(),
    }
}

/// Look a marker up by its class name
pub fn by_name(name: &str) -> Option<Arc<ClassDef>> {
    match name {
        WEAK_BASE => Some(weak_base()),
        STRONG_BASE => Some(strong_base()),
        SAFE_BASE => Some(safe_base()),
        _ => None,
    }
}

pub fn all() -> [Arc<ClassDef>; 3] {
    [weak_base(), strong_base(), safe_base()]
}
