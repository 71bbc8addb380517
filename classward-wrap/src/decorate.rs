//! Decorator-style wrapper type composition

use classward_core::Value;
use std::sync::Arc;

use crate::{BaseType, WrapConfig, Wrapper, WrapperType};

/// Returns a decorator that turns a [`BaseType`] into a wrapper type
/// configured by `config`.
///
/// ```
/// use classward_core::ValueKind;
/// use classward_wrap::{custom_wrapper, BaseType, WrapConfig};
///
/// let decorate = custom_wrapper(WrapConfig::new().with_wrap_type(ValueKind::List));
/// let stack = decorate(BaseType::new("Stack"));
/// assert_eq!(stack.wrap_type().map(|t| t.name()), Some("list"));
/// ```
pub fn custom_wrapper(config: WrapConfig) -> impl Fn(BaseType) -> Arc<WrapperType> {
    move |base| WrapperType::compose(base, config.clone())
}

/// Turn a [`BaseType`] into a wrapper type with the default configuration
pub fn wrapper(base: BaseType) -> Arc<WrapperType> {
    custom_wrapper(WrapConfig::default())(base)
}

/// Wrap `value` in a plain wrapper
pub fn wrap(value: impl Into<Value>) -> Wrapper {
    let mut wrapper = WrapperType::plain().new_instance();
    wrapper.rebind(value.into());
    wrapper
}
