//! Delegating wrappers for classward values
//!
//! A [`Wrapper`] owns at most one [`classward_core::Value`] and forwards
//! member and item access to it whenever the wrapper type does not provide
//! the member itself. Wrapper types are composed either declaratively with
//! [`WrapperType::builder`] or by decorating an existing [`BaseType`] with
//! [`custom_wrapper`] / [`wrapper`].

pub mod config;
pub mod decorate;
pub mod error;
pub mod wrap_type;
pub mod wrapper;

pub use config::{WrapConfig, DEFAULT_WRAP_KEY};
pub use decorate::{custom_wrapper, wrap, wrapper};
pub use error::{AttributeError, CallError, TypeError, WrapError};
pub use wrap_type::WrapType;
pub use wrapper::{
    Attr, BaseType, ItemGetter, ItemSetter, OwnMember, Wrapper, WrapperFn, WrapperType,
    WrapperTypeBuilder,
};
