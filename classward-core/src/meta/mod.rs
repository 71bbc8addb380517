//! Definition-time class contract enforcement
//!
//! Every class goes through [`ClassBuilder::build`], which assembles the
//! descriptor in its final resolved state and hands it to the
//! [`ContractValidator`] for the policy bound to the class:
//!
//! - [`Policy::Weak`]: no definition-time check; classes with unresolved
//!   abstract members only fail when instantiated.
//! - [`Policy::Strong`]: every abstract member inherited from a base must be
//!   implemented or re-declared abstract in the new class body.
//! - [`Policy::Safe`]: a concrete method may not shadow a member that a base
//!   already provides. Special names are exempt.

pub mod builder;
pub mod error;
pub mod markers;
pub mod registry;
pub mod validator;

pub use builder::{define_class, ClassBuilder};
pub use error::ContractError;
pub use registry::ClassRegistry;
pub use validator::{
    abstract_set, declared_callables, is_special_name, validate_safe, validate_strong,
    validate_weak, ContractValidator,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Enforcement policy bound to a class and inherited by its descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Weak,
    Strong,
    Safe,
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Weak => "weak",
            Policy::Strong => "strong",
            Policy::Safe => "safe",
        }
    }

    /// Combine the policy inherited so far with a base's policy.
    ///
    /// Weak is compatible with everything; strong and safe exclude each other.
    pub fn combine(self, other: Policy) -> Option<Policy> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (Policy::Weak, b) => Some(b),
            (a, Policy::Weak) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../meta_tests.rs"]
mod tests;
