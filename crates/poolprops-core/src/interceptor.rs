//! Interceptor definitions and the resolver capability
//!
//! An interceptor chain is configured as text and parsed into an ordered list
//! of [`InterceptorDefinition`]s. Turning a definition into something runnable
//! is left to the hosting runtime through [`InterceptorResolver`].

use std::borrow::Cow;
use std::collections::HashMap;

use crate::Result;

/// Flat name to value mapping used for interceptor and connection properties
pub type PropertyMap = HashMap<String, String>;

/// Package prepended to interceptor class names that carry no namespace
pub const DEFAULT_INTERCEPTOR_PACKAGE: &str = "org.apache.tomcat.jdbc.pool.interceptor.";

/// A single entry of an interceptor chain
///
/// Properties are keyed by name; adding a property whose name is already
/// present replaces the earlier value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptorDefinition {
    class_name: String,
    properties: PropertyMap,
}

impl InterceptorDefinition {
    /// Create a definition with no properties
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Add a property, replacing any earlier value with the same name
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_property(name, value);
        self
    }

    /// Add a property, replacing any earlier value with the same name
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// The class name exactly as it was configured
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// All properties of this interceptor
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Look up a single property value
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// The class name with `default_package` prepended when it has no `.`
    ///
    /// Names that already contain a namespace separator are returned as is.
    pub fn qualified_class_name<'a>(&'a self, default_package: &str) -> Cow<'a, str> {
        qualify_class_name(&self.class_name, default_package)
    }
}

/// Prepend `default_package` to `class_name` unless it already has a `.`
pub fn qualify_class_name<'a>(class_name: &'a str, default_package: &str) -> Cow<'a, str> {
    if class_name.contains('.') {
        Cow::Borrowed(class_name)
    } else {
        Cow::Owned(format!("{}{}", default_package, class_name))
    }
}

/// Turns interceptor definitions into runnable interceptors
///
/// Supplied by the hosting runtime. Implementations decide how class names
/// map to types and how properties are injected; a definition that cannot be
/// resolved should fail with [`crate::PoolError::InterceptorNotFound`].
pub trait InterceptorResolver {
    /// The resolved interceptor type
    type Interceptor;

    /// Resolve a single definition
    fn resolve(&self, definition: &InterceptorDefinition) -> Result<Self::Interceptor>;

    /// Resolve a whole chain, preserving its order
    fn resolve_chain(&self, definitions: &[InterceptorDefinition]) -> Result<Vec<Self::Interceptor>> {
        definitions.iter().map(|d| self.resolve(d)).collect()
    }
}
