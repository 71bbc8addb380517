//! Wrapper type configuration

use crate::WrapType;

/// Named argument that carries an explicit value to wrap
pub const DEFAULT_WRAP_KEY: &str = "wrap";

/// How a wrapper type binds its value at construction
#[derive(Debug, Clone, PartialEq)]
pub struct WrapConfig {
    /// Named argument looked up first when constructing
    pub wrap_key: String,
    /// Accepted type of the wrapped value; `None` accepts anything
    pub wrap_type: Option<WrapType>,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            wrap_key: DEFAULT_WRAP_KEY.to_string(),
            wrap_type: None,
        }
    }
}

impl WrapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wrap_key(mut self, key: impl Into<String>) -> Self {
        self.wrap_key = key.into();
        self
    }

    pub fn with_wrap_type(mut self, wrap_type: impl Into<WrapType>) -> Self {
        self.wrap_type = Some(wrap_type.into());
        self
    }
}
