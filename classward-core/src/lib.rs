//! Core types for classward
//!
//! This crate provides the object model that class contracts are checked
//! against, including:
//! - Value representation and member/item access
//! - Class descriptors, method resolution order and instances
//! - Definition-time contract enforcement (weak, strong and safe policies)
//! - Error types

pub mod class;
pub mod error;
pub mod meta;
pub mod value;

pub use class::{ClassDef, Instance, InstantiationError, Member, MemberKind, Namespace};
pub use error::{Error, Result};
pub use meta::markers;
pub use meta::{
    define_class, ClassBuilder, ClassRegistry, ContractError, ContractValidator, Policy,
};
pub use value::{CallArgs, Method, Value, ValueError, ValueKind, ValueResult};
