//! Policy checks run once per class definition

use std::collections::BTreeSet;
use tracing::trace;

use super::{ContractError, Policy};
use crate::class::{ClassDef, Member, Namespace};

/// Special (protocol) names contain a double underscore: `__init__`,
/// `__getitem__`, and mangled private names alike.
pub fn is_special_name(name: &str) -> bool {
    name.contains("__")
}

/// Names declared as concrete methods in `namespace`, optionally without
/// special names. Attributes are not callable and never listed.
pub fn declared_callables(namespace: &Namespace, exclude_special: bool) -> BTreeSet<&str> {
    namespace
        .iter()
        .filter(|(_, member)| matches!(member, Member::Method(_)))
        .filter(|(name, _)| !(exclude_special && is_special_name(name)))
        .map(|(name, _)| name)
        .collect()
}

/// Names abstract and unresolved as of `class`
pub fn abstract_set(class: &ClassDef) -> &BTreeSet<String> {
    class.abstract_methods()
}

/// Weak classes are only checked at instantiation time
pub fn validate_weak(_class: &ClassDef) -> Result<(), ContractError> {
    Ok(())
}

/// Every abstract member of a base that is still abstract on the assembled
/// class must be declared in its body, either implemented or deferred.
pub fn validate_strong(class: &ClassDef) -> Result<(), ContractError> {
    let namespace = class.namespace();
    let callables = declared_callables(namespace, false);

    for base in class.bases() {
        for method in abstract_set(base) {
            let still_abstract = class.resolve(method).is_some_and(Member::is_abstract);
            if !still_abstract {
                trace!("{}: {} of {} resolved by inheritance", class.name(), method, base.name());
                continue;
            }

            let deferred = namespace.get(method).is_some_and(Member::is_abstract);
            if callables.contains(method.as_str()) || deferred {
                continue;
            }

            return Err(ContractError::UnimplementedAbstract {
                class_name: class.name().to_string(),
                method: method.clone(),
                base: base.name().to_string(),
            });
        }
    }
    Ok(())
}

/// No concrete, non-special method of the class body may already exist on a base
pub fn validate_safe(class: &ClassDef) -> Result<(), ContractError> {
    let concrete = declared_callables(class.namespace(), true);

    for base in class.bases() {
        for method in &concrete {
            if base.has_member(method) {
                return Err(ContractError::ShadowedMethod {
                    class_name: class.name().to_string(),
                    method: method.to_string(),
                    base: base.name().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Dispatches a class definition to the check of its policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractValidator {
    policy: Policy,
}

impl ContractValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn validate(&self, class: &ClassDef) -> Result<(), ContractError> {
        match self.policy {
            Policy::Weak => validate_weak(class),
            Policy::Strong => validate_strong(class),
            Policy::Safe => validate_safe(class),
        }
    }
}
