//! Definition-time contract errors

use thiserror::Error;

use super::Policy;

/// A class definition was rejected. No class object exists afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Strong policy: an inherited abstract member was neither implemented
    /// nor deferred
    #[error(
        "Can't create abstract class {class_name}! {class_name} must implement \
         abstract method {method} of class {base}."
    )]
    UnimplementedAbstract {
        class_name: String,
        method: String,
        base: String,
    },

    /// Safe policy: a concrete method would shadow a member of a base
    #[error(
        "Can't create abstract class {class_name}! Method {method} is already \
         implemented in class {base}."
    )]
    ShadowedMethod {
        class_name: String,
        method: String,
        base: String,
    },

    #[error(
        "Cannot create a consistent method resolution order for {class_name} \
         (bases {})",
        .bases.join(", ")
    )]
    InconsistentHierarchy {
        class_name: String,
        bases: Vec<String>,
    },

    #[error("Duplicate base class {base} in definition of {class_name}")]
    DuplicateBase { class_name: String, base: String },

    #[error(
        "Policy conflict in {class_name}: base {base} is bound to the {found} \
         policy but the other bases are {inherited}"
    )]
    PolicyConflict {
        class_name: String,
        base: String,
        inherited: Policy,
        found: Policy,
    },

    #[error("Class name must not be empty")]
    EmptyName,
}

impl ContractError {
    /// Name of the rejected class
    pub fn class_name(&self) -> Option<&str> {
        match self {
            ContractError::UnimplementedAbstract { class_name, .. }
            | ContractError::ShadowedMethod { class_name, .. }
            | ContractError::InconsistentHierarchy { class_name, .. }
            | ContractError::DuplicateBase { class_name, .. }
            | ContractError::PolicyConflict { class_name, .. } => Some(class_name),
            ContractError::EmptyName => None,
        }
    }

    /// Offending method, for policy violations
    pub fn method(&self) -> Option<&str> {
        match self {
            ContractError::UnimplementedAbstract { method, .. }
            | ContractError::ShadowedMethod { method, .. } => Some(method),
            _ => None,
        }
    }

    /// Base class the violation was found against
    pub fn base(&self) -> Option<&str> {
        match self {
            ContractError::UnimplementedAbstract { base, .. }
            | ContractError::ShadowedMethod { base, .. }
            | ContractError::DuplicateBase { base, .. }
            | ContractError::PolicyConflict { base, .. } => Some(base),
            _ => None,
        }
    }
}
