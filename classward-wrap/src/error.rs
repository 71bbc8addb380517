//! Error types for wrapper construction and access

use classward_core::ValueError;
use thiserror::Error;

/// Errors raised while constructing a wrapper
#[derive(Error, Debug)]
pub enum WrapError {
    /// An explicitly passed value is not of the accepted type
    #[error("Wrong type, unable to wrap object {value}: {wrapper_type} accepts {expected}")]
    TypeMismatch {
        wrapper_type: String,
        expected: String,
        value: String,
    },

    /// The accepted type rejected the constructor arguments
    #[error("Wrapped type '{target}' cannot be initiated with these arguments")]
    ConstructionFailed {
        target: String,
        #[source]
        source: classward_core::Error,
    },
}

/// Member lookup failed on both the wrapper and the wrapped value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    #[error("'{wrapper_type}' object has no attribute called {member}")]
    NoSuchMember {
        member: String,
        wrapper_type: String,
    },
}

/// Item access failed on both the wrapper and the wrapped value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("'{wrapper_type}' object is not subscriptable")]
    NotSubscriptable {
        wrapper_type: String,
        #[source]
        source: Option<ValueError>,
    },

    #[error("'{wrapper_type}' object does not support item assignment")]
    NotAssignable {
        wrapper_type: String,
        #[source]
        source: Option<ValueError>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Value(#[from] ValueError),
}
