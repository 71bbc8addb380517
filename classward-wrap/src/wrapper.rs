//! Wrapper types and their instances

use classward_core::{CallArgs, Value, ValueError, ValueResult};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

use crate::error::{AttributeError, CallError, TypeError, WrapError};
use crate::{WrapConfig, WrapType};

/// Own method of a wrapper type; receives the wrapper itself
pub type WrapperFn = Arc<dyn Fn(&mut Wrapper, &CallArgs) -> ValueResult<Value> + Send + Sync>;

/// Own indexed read of a wrapper type
pub type ItemGetter = Arc<dyn Fn(&Wrapper, &Value) -> ValueResult<Value> + Send + Sync>;

/// Own indexed write of a wrapper type
pub type ItemSetter = Arc<dyn Fn(&mut Wrapper, &Value, Value) -> ValueResult<()> + Send + Sync>;

/// Member provided by the wrapper type rather than the wrapped value
#[derive(Clone)]
pub enum OwnMember {
    Method(WrapperFn),
    Attribute(Value),
}

impl fmt::Debug for OwnMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnMember::Method(_) => write!(f, "Method(..)"),
            OwnMember::Attribute(value) => f.debug_tuple("Attribute").field(value).finish(),
        }
    }
}

/// The extension a wrapper type adds on top of the value it wraps
#[derive(Clone, Default)]
pub struct BaseType {
    name: String,
    members: FxHashMap<String, OwnMember>,
    item_getter: Option<ItemGetter>,
    item_setter: Option<ItemSetter>,
}

impl BaseType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Wrapper, &CallArgs) -> ValueResult<Value> + Send + Sync + 'static,
    {
        self.members
            .insert(name.into(), OwnMember::Method(Arc::new(body)));
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members
            .insert(name.into(), OwnMember::Attribute(value.into()));
        self
    }

    pub fn item_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&Wrapper, &Value) -> ValueResult<Value> + Send + Sync + 'static,
    {
        self.item_getter = Some(Arc::new(getter));
        self
    }

    pub fn item_setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&mut Wrapper, &Value, Value) -> ValueResult<()> + Send + Sync + 'static,
    {
        self.item_setter = Some(Arc::new(setter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(&self, name: &str) -> Option<&OwnMember> {
        self.members.get(name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Own member names, sorted
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseType")
            .field("name", &self.name)
            .field("members", &self.member_names())
            .field("item_getter", &self.item_getter.is_some())
            .field("item_setter", &self.item_setter.is_some())
            .finish()
    }
}

/// A [`BaseType`] composed with a [`WrapConfig`]
#[derive(Debug)]
pub struct WrapperType {
    base: BaseType,
    config: WrapConfig,
}

impl WrapperType {
    /// Declare a wrapper type member by member
    pub fn builder(name: impl Into<String>) -> WrapperTypeBuilder {
        WrapperTypeBuilder {
            base: BaseType::new(name),
            config: WrapConfig::default(),
        }
    }

    /// The bare wrapper type: no own members, default configuration
    pub fn plain() -> Arc<WrapperType> {
        static PLAIN: OnceLock<Arc<WrapperType>> = OnceLock::new();
        Arc::clone(
            PLAIN.get_or_init(|| WrapperType::compose(BaseType::new("Wrapper"), WrapConfig::default())),
        )
    }

    /// Single composition point for the declarative and decorative forms
    pub(crate) fn compose(base: BaseType, config: WrapConfig) -> Arc<WrapperType> {
        debug!(
            "Composed wrapper type {} (key '{}', accepts {})",
            base.name(),
            config.wrap_key,
            config
                .wrap_type
                .as_ref()
                .map_or("anything", WrapType::name)
        );
        Arc::new(WrapperType { base, config })
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn base(&self) -> &BaseType {
        &self.base
    }

    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    pub fn wrap_key(&self) -> &str {
        &self.config.wrap_key
    }

    pub fn wrap_type(&self) -> Option<&WrapType> {
        self.config.wrap_type.as_ref()
    }

    /// An unbound wrapper of this type
    pub fn new_instance(self: &Arc<Self>) -> Wrapper {
        Wrapper {
            ty: Arc::clone(self),
            wrapped: None,
            fields: FxHashMap::default(),
        }
    }

    /// Construct a wrapper, binding its value from the arguments.
    ///
    /// The value named by the wrap key wins. Otherwise, with an accepted type,
    /// the first positional argument of that type is bound, and failing that
    /// the accepted type is called with the remaining arguments.
    pub fn instantiate(self: &Arc<Self>, mut args: CallArgs) -> Result<Wrapper, WrapError> {
        let mut wrapper = self.new_instance();
        let explicit = args
            .take_named(self.wrap_key())
            .filter(|value| !value.is_nil());

        match (explicit, self.wrap_type()) {
            (Some(value), Some(ty)) if !ty.matches(&value) => {
                return Err(WrapError::TypeMismatch {
                    wrapper_type: self.name().to_string(),
                    expected: ty.name().to_string(),
                    value: value.repr(),
                });
            }
            (Some(value), _) => wrapper.wrapped = Some(value),
            (None, Some(ty)) => {
                let found = args.positional.iter().find(|arg| ty.matches(arg)).cloned();
                let value = match found {
                    Some(value) => value,
                    None => ty
                        .construct(&args)
                        .map_err(|source| WrapError::ConstructionFailed {
                            target: ty.name().to_string(),
                            source,
                        })?,
                };
                wrapper.wrapped = Some(value).filter(|value| !value.is_nil());
            }
            (None, None) => {}
        }

        trace!(
            "Instantiated {} ({})",
            self.name(),
            if wrapper.is_bound() { "bound" } else { "unbound" }
        );
        Ok(wrapper)
    }
}

/// Declarative construction of a [`WrapperType`]
pub struct WrapperTypeBuilder {
    base: BaseType,
    config: WrapConfig,
}

impl WrapperTypeBuilder {
    pub fn wrap_key(mut self, key: impl Into<String>) -> Self {
        self.config.wrap_key = key.into();
        self
    }

    pub fn wrap_type(mut self, wrap_type: impl Into<WrapType>) -> Self {
        self.config.wrap_type = Some(wrap_type.into());
        self
    }

    pub fn config(mut self, config: WrapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Wrapper, &CallArgs) -> ValueResult<Value> + Send + Sync + 'static,
    {
        self.base = self.base.method(name, body);
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base = self.base.attribute(name, value);
        self
    }

    pub fn item_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&Wrapper, &Value) -> ValueResult<Value> + Send + Sync + 'static,
    {
        self.base = self.base.item_getter(getter);
        self
    }

    pub fn item_setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&mut Wrapper, &Value, Value) -> ValueResult<()> + Send + Sync + 'static,
    {
        self.base = self.base.item_setter(setter);
        self
    }

    pub fn build(self) -> Arc<WrapperType> {
        WrapperType::compose(self.base, self.config)
    }
}

/// Result of a member lookup on a wrapper
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    /// Instance field of the wrapper
    Field(Value),
    /// Attribute of the wrapper type
    Own(Value),
    /// Method of the wrapper type, invoked through [`Wrapper::call`]
    Method(String),
    /// Member of the wrapped value
    Forwarded(Value),
}

impl Attr {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Attr::Field(value) | Attr::Own(value) | Attr::Forwarded(value) => Some(value),
            Attr::Method(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Attr::Field(value) | Attr::Own(value) | Attr::Forwarded(value) => Some(value),
            Attr::Method(_) => None,
        }
    }

    pub fn is_forwarded(&self) -> bool {
        matches!(self, Attr::Forwarded(_))
    }
}

/// Instance of a [`WrapperType`]
pub struct Wrapper {
    ty: Arc<WrapperType>,
    wrapped: Option<Value>,
    fields: FxHashMap<String, Value>,
}

impl Wrapper {
    pub fn wrapper_type(&self) -> &Arc<WrapperType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Bind `value` if the wrapper type accepts it; otherwise leave the
    /// wrapper unchanged. Without an accepted type, `Nil` unbinds.
    pub fn rebind(&mut self, value: Value) -> &mut Self {
        match self.ty.config.wrap_type.as_ref() {
            None => self.wrapped = Some(value).filter(|value| !value.is_nil()),
            Some(ty) if ty.matches(&value) => {
                self.wrapped = Some(value).filter(|value| !value.is_nil())
            }
            Some(ty) => trace!(
                "{} ignored a {} value, accepts {}",
                self.ty.name(),
                value.type_name(),
                ty
            ),
        }
        self
    }

    pub fn is_bound(&self) -> bool {
        self.wrapped.is_some()
    }

    pub fn wrapped(&self) -> Option<&Value> {
        self.wrapped.as_ref()
    }

    /// Mutates the bound value in place. A result the accepted type rejects
    /// restores the previous value; a Nil result unbinds.
    pub fn with_wrapped_mut<R>(&mut self, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        let current = self.wrapped.as_mut()?;
        let previous = current.clone();
        let result = f(current);
        if let Some(ty) = self.ty.config.wrap_type.as_ref() {
            if !ty.matches(current) {
                trace!(
                    "{} restored its value after a {} mutation, accepts {}",
                    self.ty.name(),
                    current.type_name(),
                    ty
                );
                *current = previous;
            }
        }
        if current.is_nil() {
            self.wrapped = None;
        }
        Some(result)
    }

    pub fn into_wrapped(self) -> Option<Value> {
        self.wrapped
    }

    pub fn has_attr(&self, member: &str) -> bool {
        self.get_attr(member).is_ok()
    }

    /// Instance fields first, then the wrapper type, then the wrapped value
    pub fn get_attr(&self, member: &str) -> Result<Attr, AttributeError> {
        if let Some(value) = self.fields.get(member) {
            return Ok(Attr::Field(value.clone()));
        }

        match self.ty.base.member(member) {
            Some(OwnMember::Attribute(value)) => return Ok(Attr::Own(value.clone())),
            Some(OwnMember::Method(_)) => return Ok(Attr::Method(member.to_string())),
            None => {}
        }

        if let Some(inner) = &self.wrapped {
            match inner.get_attr(member) {
                Ok(value) => return Ok(Attr::Forwarded(value)),
                Err(err) => trace!("{}.{} not forwarded: {}", self.type_name(), member, err),
            }
        }

        Err(self.no_such_member(member))
    }

    /// Set an instance field on the wrapper; never forwarded
    pub fn set_attr(&mut self, member: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(member.into(), value.into());
    }

    /// Call member `member` with `args`
    pub fn call(&mut self, member: &str, args: &CallArgs) -> Result<Value, CallError> {
        let own = match self.ty.base.member(member) {
            Some(OwnMember::Method(body)) if !self.fields.contains_key(member) => {
                Some(Arc::clone(body))
            }
            _ => None,
        };
        if let Some(body) = own {
            return Ok(body(self, args)?);
        }

        let target = self
            .get_attr(member)?
            .into_value()
            .ok_or_else(|| self.no_such_member(member))?;
        Ok(target.call(args)?)
    }

    /// Own item support first, then the wrapped value
    pub fn get_item(&self, key: &Value) -> Result<Value, TypeError> {
        let mut last = None;

        if let Some(getter) = &self.ty.base.item_getter {
            match getter(self, key) {
                Ok(value) => return Ok(value),
                Err(err) => last = Some(err),
            }
        }

        if let Some(inner) = &self.wrapped {
            match inner.get_item(key) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    trace!("{}[{}] not forwarded: {}", self.type_name(), key.repr(), err);
                    last = Some(err);
                }
            }
        }

        Err(TypeError::NotSubscriptable {
            wrapper_type: self.type_name().to_string(),
            source: last,
        })
    }

    pub fn set_item(&mut self, key: &Value, value: Value) -> Result<(), TypeError> {
        let mut last: Option<ValueError> = None;

        if let Some(setter) = self.ty.base.item_setter.clone() {
            match setter(self, key, value.clone()) {
                Ok(()) => return Ok(()),
                Err(err) => last = Some(err),
            }
        }

        if let Some(inner) = self.wrapped.as_mut() {
            match inner.set_item(key, value) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    trace!("{}[{}] = .. not forwarded: {}", self.ty.name(), key.repr(), err);
                    last = Some(err);
                }
            }
        }

        Err(TypeError::NotAssignable {
            wrapper_type: self.type_name().to_string(),
            source: last,
        })
    }

    /// str of the wrapped value
    pub fn to_display_string(&self) -> String {
        match &self.wrapped {
            Some(value) => value.to_string(),
            None => Value::Nil.to_string(),
        }
    }

    /// repr of the wrapped value
    pub fn to_debug_string(&self) -> String {
        match &self.wrapped {
            Some(value) => value.repr(),
            None => Value::Nil.repr(),
        }
    }

    fn no_such_member(&self, member: &str) -> AttributeError {
        AttributeError::NoSuchMember {
            member: member.to_string(),
            wrapper_type: self.type_name().to_string(),
        }
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_debug_string())
    }
}

#[cfg(test)]
#[path = "wrapper_tests.rs"]
mod tests;
