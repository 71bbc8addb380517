//! Error types for value operations

use std::fmt;

/// Error type for value operations
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Type mismatch error
    TypeError {
        expected: &'static str,
        actual: String,
    },

    /// Index out of bounds
    IndexOutOfBounds { index: i64, length: usize },

    /// Key not found in map
    KeyNotFound(String),

    /// Member lookup failed on a value
    NoSuchAttribute { type_name: String, attribute: String },

    /// Value does not support indexed reads
    NotSubscriptable(String),

    /// Value does not support indexed writes
    NotAssignable(String),

    /// Value cannot be called
    NotCallable(String),

    /// Invalid operation
    InvalidOperation(String),

    /// Conversion error
    ConversionError {
        from: &'static str,
        to: &'static str,
        reason: String,
    },

    /// Function arity mismatch
    ArityMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::TypeError { expected, actual } => {
                write!(f, "Type error: expected {}, got {}", expected, actual)
            }
            ValueError::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for sequence of length {}",
                    index, length
                )
            }
            ValueError::KeyNotFound(key) => {
                write!(f, "Key not found: {}", key)
            }
            ValueError::NoSuchAttribute {
                type_name,
                attribute,
            } => {
                write!(f, "'{}' object has no attribute '{}'", type_name, attribute)
            }
            ValueError::NotSubscriptable(type_name) => {
                write!(f, "'{}' object is not subscriptable", type_name)
            }
            ValueError::NotAssignable(type_name) => {
                write!(f, "'{}' object does not support item assignment", type_name)
            }
            ValueError::NotCallable(type_name) => {
                write!(f, "'{}' object is not callable", type_name)
            }
            ValueError::InvalidOperation(msg) => {
                write!(f, "Invalid operation: {}", msg)
            }
            ValueError::ConversionError { from, to, reason } => {
                write!(f, "Cannot convert {} to {}: {}", from, to, reason)
            }
            ValueError::ArityMismatch { expected, actual } => {
                write!(f, "Function expects {} arguments, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;
