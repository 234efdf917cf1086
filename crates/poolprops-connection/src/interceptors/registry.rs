//! Name-keyed interceptor registry

use std::collections::HashMap;

use poolprops_core::{
    DEFAULT_INTERCEPTOR_PACKAGE, InterceptorDefinition, InterceptorResolver, PoolError,
    PropertyMap, Result, qualify_class_name,
};

/// Builds an interceptor from its configured properties
pub type InterceptorFactory<T> = Box<dyn Fn(&PropertyMap) -> Result<T> + Send + Sync>;

/// Resolves interceptor definitions against a set of registered factories
///
/// Factories are stored under their fully qualified class name. Both
/// registration and lookup apply the default package to names without a
/// `.`, so `"ConnectionState"` and
/// `"org.apache.tomcat.jdbc.pool.interceptor.ConnectionState"` refer to the
/// same entry.
///
/// # Example
///
/// ```
/// use poolprops_connection::InterceptorRegistry;
/// use poolprops_connection::interceptors::parse_interceptor_chain;
/// use poolprops_core::InterceptorResolver;
///
/// let mut registry = InterceptorRegistry::new();
/// registry.register("SlowQueryReport", |props| {
///     Ok(props.get("threshold").cloned().unwrap_or_default())
/// });
///
/// let chain = parse_interceptor_chain(Some("SlowQueryReport(threshold=500)")).unwrap();
/// assert_eq!(registry.resolve_chain(&chain).unwrap(), vec!["500".to_string()]);
/// ```
pub struct InterceptorRegistry<T> {
    default_package: String,
    factories: HashMap<String, InterceptorFactory<T>>,
}

impl<T> InterceptorRegistry<T> {
    /// Create an empty registry using [`DEFAULT_INTERCEPTOR_PACKAGE`]
    pub fn new() -> Self {
        Self {
            default_package: DEFAULT_INTERCEPTOR_PACKAGE.to_string(),
            factories: HashMap::new(),
        }
    }

    /// Use a different default package for names without a namespace
    ///
    /// Only affects registrations made after this call.
    pub fn with_default_package(mut self, default_package: impl Into<String>) -> Self {
        self.default_package = default_package.into();
        self
    }

    /// Register a factory, replacing any earlier one with the same name
    pub fn register<F>(&mut self, class_name: &str, factory: F) -> &mut Self
    where
        F: Fn(&PropertyMap) -> Result<T> + Send + Sync + 'static,
    {
        let qualified = qualify_class_name(class_name, &self.default_package).into_owned();
        tracing::debug!(class = %qualified, "registered interceptor factory");
        self.factories.insert(qualified, Box::new(factory));
        self
    }

    /// Check whether a class name would resolve
    pub fn contains(&self, class_name: &str) -> bool {
        self.factories
            .contains_key(qualify_class_name(class_name, &self.default_package).as_ref())
    }

    /// Get the default package
    pub fn default_package(&self) -> &str {
        &self.default_package
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if no factories are registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<T> Default for InterceptorRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InterceptorResolver for InterceptorRegistry<T> {
    type Interceptor = T;

    fn resolve(&self, definition: &InterceptorDefinition) -> Result<T> {
        let qualified = definition.qualified_class_name(&self.default_package);
        let Some(factory) = self.factories.get(qualified.as_ref()) else {
            tracing::warn!(class = %qualified, "no interceptor registered");
            return Err(PoolError::InterceptorNotFound(qualified.into_owned()));
        };

        tracing::debug!(class = %qualified, "loading interceptor");
        factory(definition.properties())
    }
}
