//! Runtime value representation

pub mod builtins;
pub mod error;

pub use error::{ValueError, ValueResult};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::class::{Instance, Member};

/// Native method body. The first argument is the receiver.
pub type NativeFn = Arc<dyn Fn(&Value, &CallArgs) -> ValueResult<Value> + Send + Sync>;

/// Runtime value types
#[derive(Clone)]
pub enum Value {
    /// Absence of a value
    Nil,

    /// Boolean value
    Boolean(bool),

    /// Integer value
    Integer(i64),

    /// Floating point value
    Float(f64),

    /// String value
    String(String),

    /// List of values
    List(Vec<Value>),

    /// String-keyed map
    Map(FxHashMap<String, Value>),

    /// Instance of a user-defined class, shared by reference
    Object(Arc<Instance>),

    /// Method bound to its receiver
    BoundMethod {
        receiver: Box<Value>,
        method: Method,
    },
}

/// Fieldless tag of a [`Value`], used for builtin type checks and construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Nil,
    Boolean,
    Integer,
    Float,
    String,
    List,
    Map,
    Object,
    Method,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Object => "object",
            ValueKind::Method => "method",
        }
    }

    /// Build a value of this kind the way the builtin type constructor would
    pub fn construct(&self, args: &CallArgs) -> ValueResult<Value> {
        builtins::construct(*self, args)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Positional and named arguments of a call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub named: FxHashMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positional(positional: Vec<Value>) -> Self {
        Self {
            positional,
            named: FxHashMap::default(),
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument, replacing an earlier one with the same name
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Remove and return a named argument
    pub fn take_named(&mut self, name: &str) -> Option<Value> {
        self.named.remove(name)
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Fail unless exactly `expected` positional arguments were passed
    pub fn expect_arity(&self, expected: usize) -> ValueResult<()> {
        if self.positional.len() == expected {
            Ok(())
        } else {
            Err(ValueError::ArityMismatch {
                expected,
                actual: self.positional.len(),
            })
        }
    }
}

/// A named native method body together with the type that owns it
#[derive(Clone)]
pub struct Method {
    owner: String,
    name: String,
    body: NativeFn,
}

impl Method {
    pub fn new<F>(owner: impl Into<String>, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &CallArgs) -> ValueResult<Value> + Send + Sync + 'static,
    {
        Self {
            owner: owner.into(),
            name: name.into(),
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn with_owner(mut self, owner: &str) -> Self {
        self.owner = owner.to_string();
        self
    }

    pub fn invoke(&self, receiver: &Value, args: &CallArgs) -> ValueResult<Value> {
        (self.body)(receiver, args)
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({}.{})", self.owner, self.name)
    }
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::BoundMethod { .. })
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Object(_) => ValueKind::Object,
            Value::BoundMethod { .. } => ValueKind::Method,
        }
    }

    /// Type name for error messages; objects report their class name
    pub fn type_name(&self) -> &str {
        match self {
            Value::Object(instance) => instance.class().name(),
            other => other.kind().name(),
        }
    }

    /// Check if value is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Object(_) | Value::BoundMethod { .. } => true,
        }
    }

    pub fn as_integer(&self) -> ValueResult<i64> {
        match self {
            Value::Integer(n) => Ok(*n),
            _ => Err(self.type_error("integer")),
        }
    }

    pub fn as_string(&self) -> ValueResult<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.type_error("string")),
        }
    }

    pub fn as_list(&self) -> ValueResult<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(self.type_error("list")),
        }
    }

    pub fn as_map(&self) -> ValueResult<&FxHashMap<String, Value>> {
        match self {
            Value::Map(map) => Ok(map),
            _ => Err(self.type_error("map")),
        }
    }

    pub fn as_object(&self) -> ValueResult<&Arc<Instance>> {
        match self {
            Value::Object(instance) => Ok(instance),
            _ => Err(self.type_error("object")),
        }
    }

    fn type_error(&self, expected: &'static str) -> ValueError {
        ValueError::TypeError {
            expected,
            actual: self.type_name().to_string(),
        }
    }

    /// Read member `name`: instance fields, then the class MRO for objects,
    /// the builtin method table otherwise.
    pub fn get_attr(&self, name: &str) -> ValueResult<Value> {
        let found = match self {
            Value::Object(instance) => match instance.field(name) {
                Some(value) => Some(value),
                None => match instance.class().resolve(name) {
                    Some(Member::Method(method)) => Some(self.bind(method.clone())),
                    Some(Member::Attribute(value)) => Some(value.clone()),
                    Some(Member::Abstract) | None => None,
                },
            },
            other => builtins::method(other.kind(), name).map(|method| self.bind(method)),
        };

        found.ok_or_else(|| ValueError::NoSuchAttribute {
            type_name: self.type_name().to_string(),
            attribute: name.to_string(),
        })
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_ok()
    }

    fn bind(&self, method: Method) -> Value {
        Value::BoundMethod {
            receiver: Box::new(self.clone()),
            method,
        }
    }

    /// Call this value
    pub fn call(&self, args: &CallArgs) -> ValueResult<Value> {
        match self {
            Value::BoundMethod { receiver, method } => method.invoke(receiver, args),
            _ => Err(ValueError::NotCallable(self.type_name().to_string())),
        }
    }

    /// Look up member `name` and call it
    pub fn call_method(&self, name: &str, args: &CallArgs) -> ValueResult<Value> {
        self.get_attr(name)?.call(args)
    }

    /// Special methods are looked up on the class only, never on instance fields
    fn special_method(&self, name: &str) -> Option<Method> {
        match self {
            Value::Object(instance) => match instance.class().resolve(name) {
                Some(Member::Method(method)) => Some(method.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Indexed read
    pub fn get_item(&self, key: &Value) -> ValueResult<Value> {
        match self {
            Value::List(items) => {
                let index = normalize_index(key, items.len())?;
                Ok(items[index].clone())
            }
            Value::String(s) => {
                let chars: Vec<char> = s.chars().collect();
                let index = normalize_index(key, chars.len())?;
                Ok(Value::String(chars[index].to_string()))
            }
            Value::Map(map) => {
                let key = key.as_string()?;
                map.get(key)
                    .cloned()
                    .ok_or_else(|| ValueError::KeyNotFound(key.to_string()))
            }
            Value::Object(_) => match self.special_method("__getitem__") {
                Some(method) => {
                    method.invoke(self, &CallArgs::from_positional(vec![key.clone()]))
                }
                None => Err(ValueError::NotSubscriptable(self.type_name().to_string())),
            },
            _ => Err(ValueError::NotSubscriptable(self.type_name().to_string())),
        }
    }

    /// Indexed write
    pub fn set_item(&mut self, key: &Value, value: Value) -> ValueResult<()> {
        match self {
            Value::List(items) => {
                let index = normalize_index(key, items.len())?;
                items[index] = value;
                Ok(())
            }
            Value::Map(map) => {
                let key = key.as_string()?;
                map.insert(key.to_string(), value);
                Ok(())
            }
            Value::Object(_) => match self.special_method("__setitem__") {
                Some(method) => {
                    let args = CallArgs::from_positional(vec![key.clone(), value]);
                    method.invoke(self, &args).map(|_| ())
                }
                None => Err(ValueError::NotAssignable(self.type_name().to_string())),
            },
            _ => Err(ValueError::NotAssignable(self.type_name().to_string())),
        }
    }

    /// Unambiguous text form; the display form is the [`fmt::Display`] impl
    pub fn repr(&self) -> String {
        match self {
            Value::Nil => "None".to_string(),
            Value::Boolean(b) => String::from(if *b { "True" } else { "False" }),
            Value::Integer(n) => n.to_string(),
            Value::Float(x) => format_float(*x),
            Value::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let inner: Vec<String> = keys
                    .into_iter()
                    .map(|k| format!("'{}': {}", k, map[k].repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Object(instance) => self
                .special_text("__repr__")
                .unwrap_or_else(|| format!("<{} object>", instance.class().name())),
            Value::BoundMethod { receiver, method } => format!(
                "<bound method {}.{} of {}>",
                method.owner(),
                method.name(),
                receiver.repr()
            ),
        }
    }

    fn special_text(&self, name: &str) -> Option<String> {
        let method = self.special_method(name)?;
        match method.invoke(self, &CallArgs::new()) {
            Ok(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

fn normalize_index(key: &Value, length: usize) -> ValueResult<usize> {
    let index = key.as_integer()?;
    let resolved = if index < 0 {
        index + length as i64
    } else {
        index
    };
    if resolved < 0 || resolved >= length as i64 {
        return Err(ValueError::IndexOutOfBounds { index, length });
    }
    Ok(resolved as usize)
}

fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        String::from(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Integer(n) => write!(f, "Integer({})", n),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Map(map) => f.debug_struct("Map").field("map", map).finish(),
            Value::Object(instance) => f
                .debug_struct("Object")
                .field("class", &instance.class().name())
                .finish(),
            Value::BoundMethod { receiver, method } => f
                .debug_struct("BoundMethod")
                .field("receiver", receiver)
                .field("method", method)
                .finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => (a - b).abs() < f64::EPSILON,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (
                Value::BoundMethod {
                    receiver: r1,
                    method: m1,
                },
                Value::BoundMethod {
                    receiver: r2,
                    method: m2,
                },
            ) => m1 == m2 && r1 == r2,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Object(_) => match self.special_text("__str__") {
                Some(text) => f.write_str(&text),
                None => f.write_str(&self.repr()),
            },
            other => f.write_str(&other.repr()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
#[path = "../value_tests.rs"]
mod tests;
