//! Explicit class definition pass

use std::sync::Arc;
use tracing::{debug, warn};

use super::{ContractError, ContractValidator, Policy};
use crate::class::{ClassDef, Member, Namespace};
use crate::value::{CallArgs, Value, ValueResult};

/// Collects a class body and its bases, then validates them in one step.
///
/// ```
/// use classward_core::{ClassBuilder, Policy};
///
/// let parent = ClassBuilder::new("Parent")
///     .policy(Policy::Strong)
///     .abstract_method("area")
///     .build()
///     .unwrap();
///
/// let err = ClassBuilder::new("Child").base(parent).build().unwrap_err();
/// assert_eq!(err.method(), Some("area"));
/// ```
pub struct ClassBuilder {
    name: String,
    bases: Vec<Arc<ClassDef>>,
    namespace: Namespace,
    policy: Option<Policy>,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            namespace: Namespace::new(),
            policy: None,
        }
    }

    pub fn base(mut self, base: Arc<ClassDef>) -> Self {
        self.bases.push(base);
        self
    }

    pub fn bases<I>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = Arc<ClassDef>>,
    {
        self.bases.extend(bases);
        self
    }

    pub fn abstract_method(mut self, name: impl Into<String>) -> Self {
        self.namespace.insert(name, Member::Abstract);
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &CallArgs) -> ValueResult<Value> + Send + Sync + 'static,
    {
        self.namespace = self.namespace.method(name, body);
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.namespace.insert(name, Member::Attribute(value.into()));
        self
    }

    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.namespace.insert(name, member);
        self
    }

    /// Replace the whole class body
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Bind a policy explicitly instead of inheriting it from the bases
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Validate the definition and produce the class
    pub fn build(self) -> Result<Arc<ClassDef>, ContractError> {
        let ClassBuilder {
            name,
            bases,
            namespace,
            policy,
        } = self;

        if name.trim().is_empty() {
            return Err(ContractError::EmptyName);
        }
        check_duplicate_bases(&name, &bases)?;

        let policy = match policy {
            Some(policy) => policy,
            None => inherited_policy(&name, &bases)?,
        };

        let class = ClassDef::assemble(name, bases, namespace, policy)?;
        match ContractValidator::new(policy).validate(&class) {
            Ok(()) => {
                debug!(
                    "Accepted class {} under {} policy ({} ancestors, {} abstract)",
                    class.name(),
                    policy,
                    class.mro().len(),
                    class.abstract_methods().len()
                );
                Ok(Arc::new(class))
            }
            Err(err) => {
                warn!("Rejected class {}: {}", class.name(), err);
                Err(err)
            }
        }
    }
}

/// Functional form of [`ClassBuilder`]
pub fn define_class(
    name: impl Into<String>,
    bases: Vec<Arc<ClassDef>>,
    namespace: Namespace,
    policy: Policy,
) -> Result<Arc<ClassDef>, ContractError> {
    ClassBuilder::new(name)
        .bases(bases)
        .namespace(namespace)
        .policy(policy)
        .build()
}

fn check_duplicate_bases(class_name: &str, bases: &[Arc<ClassDef>]) -> Result<(), ContractError> {
    for (i, base) in bases.iter().enumerate() {
        if bases[..i].iter().any(|earlier| Arc::ptr_eq(earlier, base)) {
            return Err(ContractError::DuplicateBase {
                class_name: class_name.to_string(),
                base: base.name().to_string(),
            });
        }
    }
    Ok(())
}

fn inherited_policy(class_name: &str, bases: &[Arc<ClassDef>]) -> Result<Policy, ContractError> {
    let mut policy = Policy::Weak;
    for base in bases {
        policy = policy
            .combine(base.policy())
            .ok_or_else(|| ContractError::PolicyConflict {
                class_name: class_name.to_string(),
                base: base.name().to_string(),
                inherited: policy,
                found: base.policy(),
            })?;
    }
    Ok(policy)
}
