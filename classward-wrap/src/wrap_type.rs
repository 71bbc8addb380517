//! Accepted value types of a wrapper

use classward_core::{CallArgs, ClassDef, Value, ValueKind};
use std::fmt;
use std::sync::Arc;

/// A builtin value kind or a user-defined class (subclasses included)
#[derive(Clone)]
pub enum WrapType {
    Kind(ValueKind),
    Class(Arc<ClassDef>),
}

impl WrapType {
    pub fn name(&self) -> &str {
        match self {
            WrapType::Kind(kind) => kind.name(),
            WrapType::Class(class) => class.name(),
        }
    }

    /// Instance check
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (WrapType::Kind(kind), value) => value.kind() == *kind,
            (WrapType::Class(class), Value::Object(instance)) => {
                instance.class().is_subclass_of(class)
            }
            (WrapType::Class(_), _) => false,
        }
    }

    /// Call the type with `args`, as a constructor
    pub fn construct(&self, args: &CallArgs) -> classward_core::Result<Value> {
        match self {
            WrapType::Kind(kind) => Ok(kind.construct(args)?),
            WrapType::Class(class) => Ok(class.instantiate(args)?),
        }
    }
}

impl PartialEq for WrapType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (WrapType::Kind(a), WrapType::Kind(b)) => a == b,
            (WrapType::Class(a), WrapType::Class(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for WrapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapType::Kind(kind) => write!(f, "Kind({})", kind),
            WrapType::Class(class) => write!(f, "Class({})", class.name()),
        }
    }
}

impl fmt::Display for WrapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ValueKind> for WrapType {
    fn from(kind: ValueKind) -> Self {
        WrapType::Kind(kind)
    }
}

impl From<Arc<ClassDef>> for WrapType {
    fn from(class: Arc<ClassDef>) -> Self {
        WrapType::Class(class)
    }
}
