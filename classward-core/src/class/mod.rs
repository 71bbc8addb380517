//! Class descriptors, members and instances
//!
//! A [`ClassDef`] is only ever produced by [`crate::meta::ClassBuilder`], so
//! every descriptor reachable from user code has passed its policy check.

mod mro;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

use crate::meta::{ContractError, Policy};
use crate::value::{CallArgs, Method, Value, ValueError, ValueResult};

/// Tag of a declared member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Abstract,
    Method,
    Attribute,
}

/// A member as written in a class body
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Declared without a body; must be implemented before instantiation
    Abstract,
    /// Concrete method
    Method(Method),
    /// Plain class-level value
    Attribute(Value),
}

impl Member {
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Abstract => MemberKind::Abstract,
            Member::Method(_) => MemberKind::Method,
            Member::Attribute(_) => MemberKind::Attribute,
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Member::Abstract)
    }

    /// Abstract members are callable too: they are methods without a body
    pub fn is_callable(&self) -> bool {
        matches!(self, Member::Abstract | Member::Method(_))
    }
}

/// Members of a single class body, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: Vec<(String, Member)>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member; redeclaring a name replaces the earlier member in place
    pub fn insert(&mut self, name: impl Into<String>, member: Member) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = member,
            None => self.entries.push((name, member)),
        }
    }

    pub fn abstract_method(mut self, name: impl Into<String>) -> Self {
        self.insert(name, Member::Abstract);
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &CallArgs) -> ValueResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let method = Method::new("", name.clone(), body);
        self.insert(name, Member::Method(method));
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, Member::Attribute(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, member)| member)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.entries.iter().map(|(n, m)| (n.as_str(), m))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stamp every method with the class that declares it
    fn owned_by(self, class_name: &str) -> Self {
        let entries = self
            .entries
            .into_iter()
            .map(|(name, member)| match member {
                Member::Method(method) => (name, Member::Method(method.with_owner(class_name))),
                other => (name, other),
            })
            .collect();
        Self { entries }
    }
}

/// Validated class descriptor
pub struct ClassDef {
    name: String,
    bases: Vec<Arc<ClassDef>>,
    namespace: Namespace,
    policy: Policy,
    /// C3 linearization of the bases, not including this class
    mro: Vec<Arc<ClassDef>>,
    abstract_methods: BTreeSet<String>,
}

impl ClassDef {
    /// A class without bases or members
    pub(crate) fn root(name: &str, policy: Policy) -> Self {
        Self {
            name: name.to_string(),
            bases: Vec::new(),
            namespace: Namespace::new(),
            policy,
            mro: Vec::new(),
            abstract_methods: BTreeSet::new(),
        }
    }

    /// Assemble a descriptor in its final resolved state; policy checks run
    /// against the result.
    pub(crate) fn assemble(
        name: String,
        bases: Vec<Arc<ClassDef>>,
        namespace: Namespace,
        policy: Policy,
    ) -> Result<Self, ContractError> {
        let mro = mro::linearize(&name, &bases)?;
        let namespace = namespace.owned_by(&name);
        let mut class = Self {
            name,
            bases,
            namespace,
            policy,
            mro,
            abstract_methods: BTreeSet::new(),
        };
        class.abstract_methods = class.collect_abstracts();
        Ok(class)
    }

    fn collect_abstracts(&self) -> BTreeSet<String> {
        let mut abstracts: BTreeSet<String> = self
            .namespace
            .iter()
            .filter(|(_, member)| member.is_abstract())
            .map(|(name, _)| name.to_string())
            .collect();

        for base in &self.bases {
            for name in &base.abstract_methods {
                if self.resolve(name).is_some_and(Member::is_abstract) {
                    abstracts.insert(name.clone());
                }
            }
        }
        abstracts
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[Arc<ClassDef>] {
        &self.bases
    }

    /// Members declared in this class body only
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn mro(&self) -> &[Arc<ClassDef>] {
        &self.mro
    }

    /// Names that are abstract and unresolved at this point of the hierarchy
    pub fn abstract_methods(&self) -> &BTreeSet<String> {
        &self.abstract_methods
    }

    pub fn is_abstract(&self) -> bool {
        !self.abstract_methods.is_empty()
    }

    /// Resolve `name` through this class body and then the MRO
    pub fn resolve(&self, name: &str) -> Option<&Member> {
        self.resolve_with_owner(name).map(|(_, member)| member)
    }

    /// Like [`ClassDef::resolve`], also naming the class that provides the member
    pub fn resolve_with_owner(&self, name: &str) -> Option<(&str, &Member)> {
        if let Some(member) = self.namespace.get(name) {
            return Some((self.name.as_str(), member));
        }
        self.mro.iter().find_map(|class| {
            class
                .namespace
                .get(name)
                .map(|member| (class.name.as_str(), member))
        })
    }

    /// True if `name` is reachable on this class by any means
    pub fn has_member(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn is_subclass_of(&self, other: &ClassDef) -> bool {
        std::ptr::eq(self, other)
            || self
                .mro
                .iter()
                .any(|class| std::ptr::eq(class.as_ref(), other))
    }

    /// Create an instance. Classes with unresolved abstract members are
    /// rejected here, whatever policy they were defined under.
    pub fn instantiate(self: &Arc<Self>, args: &CallArgs) -> Result<Value, InstantiationError> {
        if self.is_abstract() {
            return Err(InstantiationError::AbstractClass {
                class_name: self.name.clone(),
                methods: self.abstract_methods.iter().cloned().collect(),
            });
        }

        let instance = Value::Object(Arc::new(Instance {
            class: Arc::clone(self),
            fields: RwLock::new(FxHashMap::default()),
        }));

        match self.resolve("__init__") {
            Some(Member::Method(init)) => {
                init.invoke(&instance, args)
                    .map_err(|source| InstantiationError::Initializer {
                        class_name: self.name.clone(),
                        source,
                    })?;
            }
            _ if !args.is_empty() => {
                return Err(InstantiationError::UnexpectedArguments {
                    class_name: self.name.clone(),
                    count: args.len(),
                });
            }
            _ => {}
        }

        trace!("Instantiated {}", self.name);
        Ok(instance)
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bases: Vec<&str> = self.bases.iter().map(|b| b.name()).collect();
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("bases", &bases)
            .field("policy", &self.policy)
            .field("abstract_methods", &self.abstract_methods)
            .finish()
    }
}

/// Instance of a [`ClassDef`]
pub struct Instance {
    class: Arc<ClassDef>,
    fields: RwLock<FxHashMap<String, Value>>,
}

impl Instance {
    pub fn class(&self) -> &Arc<ClassDef> {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }

    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        self.fields.write().insert(name.into(), value);
    }

    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fields.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .field("fields", &self.field_names())
            .finish()
    }
}

/// Errors raised when creating an instance
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstantiationError {
    #[error(
        "Can't instantiate abstract class {class_name} with abstract methods {}",
        .methods.join(", ")
    )]
    AbstractClass {
        class_name: String,
        methods: Vec<String>,
    },

    #[error("{class_name}() takes no arguments ({count} given)")]
    UnexpectedArguments { class_name: String, count: usize },

    #[error("{class_name}.__init__ failed: {source}")]
    Initializer {
        class_name: String,
        #[source]
        source: ValueError,
    },
}

#[cfg(test)]
#[path = "../class_tests.rs"]
mod tests;
