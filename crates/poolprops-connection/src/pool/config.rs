//! Pool properties types

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arc_swap::ArcSwap;
use poolprops_core::{
    ConfigFormatError, InterceptorDefinition, InterceptorResolver, PoolError, PropertyMap, Result,
};
use serde::{Deserialize, Deserializer, Serialize};

use super::chain::ChainSnapshot;
use crate::properties::parse_properties;

static POOL_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Configuration for a connection pool
///
/// Holds the settings the pool's maintenance sweeper depends on, the
/// interceptor chain, and vendor connection properties. Plain settings are
/// set through `with_*` builders; the interceptor chain can also be replaced
/// through a shared reference while other threads read it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolProperties {
    /// Human readable pool name
    name: String,
    /// Interval in milliseconds between runs of the maintenance sweeper
    time_between_eviction_runs_ms: u64,
    /// Whether abandoned connections are reclaimed
    remove_abandoned: bool,
    /// Seconds after which a borrowed connection counts as abandoned
    remove_abandoned_timeout_secs: u64,
    /// Seconds after which a borrowed connection is logged as suspect
    suspect_timeout_secs: u64,
    /// Whether idle connections are validated by the sweeper
    test_while_idle: bool,
    /// Query used to validate connections
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_query: Option<String>,
    /// Pool usage percentage above which abandoned connections are reclaimed
    #[serde(deserialize_with = "deserialize_percentage")]
    abandon_when_percentage_full: u8,
    /// Interceptor chain text and its cached parse
    #[serde(
        rename = "jdbc_interceptors",
        with = "chain_text",
        skip_serializing_if = "chain_text::is_unset"
    )]
    interceptors: ArcSwap<ChainSnapshot>,
    /// Raw vendor property blob as last configured; its entries already live
    /// in `db_properties`, so only the table is written out
    #[serde(skip_serializing)]
    connection_properties: Option<String>,
    /// Vendor connection properties passed to the driver
    db_properties: PropertyMap,
}

impl PoolProperties {
    /// Create a pool configuration with default settings and a generated name
    pub fn new() -> Self {
        let id = POOL_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
        Self {
            name: format!("Connection Pool[{}]", id),
            time_between_eviction_runs_ms: 5_000, // 5 seconds default
            remove_abandoned: false,
            remove_abandoned_timeout_secs: 60,
            suspect_timeout_secs: 0,
            test_while_idle: false,
            validation_query: None,
            abandon_when_percentage_full: 0,
            interceptors: ArcSwap::from_pointee(ChainSnapshot::default()),
            connection_properties: None,
            db_properties: PropertyMap::new(),
        }
    }

    /// Load a pool configuration from TOML
    ///
    /// Missing keys take their defaults. `connection_properties` is folded
    /// into `db_properties`, overriding keys given in both.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut props: Self = toml::from_str(text)?;
        props.validate()?;
        if let Some(blob) = props.connection_properties.as_deref() {
            let parsed = parse_properties(Some(blob), None)?;
            props.db_properties.extend(parsed);
        }
        tracing::debug!(
            name = %props.name,
            db_properties = props.db_properties.len(),
            "loaded pool properties"
        );
        Ok(props)
    }

    /// Validate the pool configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PoolError::Configuration(
                "pool name cannot be empty".to_string(),
            ));
        }
        if self.test_while_idle && self.validation_query.as_deref() == Some("") {
            return Err(PoolError::Configuration(
                "validation query cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize the configuration to TOML
    ///
    /// The raw `connection_properties` blob is not written; the merged
    /// `db_properties` table is the saved state.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Set the pool name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the sweeper interval in milliseconds (0 disables the sweeper)
    pub fn with_time_between_eviction_runs_ms(mut self, interval_ms: u64) -> Self {
        self.time_between_eviction_runs_ms = interval_ms;
        self
    }

    /// Enable or disable abandoned connection removal
    pub fn with_remove_abandoned(mut self, remove_abandoned: bool) -> Self {
        self.remove_abandoned = remove_abandoned;
        self
    }

    /// Set the abandoned connection timeout in seconds
    pub fn with_remove_abandoned_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.remove_abandoned_timeout_secs = timeout_secs;
        self
    }

    /// Set the suspect connection timeout in seconds
    pub fn with_suspect_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.suspect_timeout_secs = timeout_secs;
        self
    }

    /// Enable or disable idle connection validation
    pub fn with_test_while_idle(mut self, test_while_idle: bool) -> Self {
        self.test_while_idle = test_while_idle;
        self
    }

    /// Set the validation query
    pub fn with_validation_query(mut self, query: impl Into<String>) -> Self {
        self.validation_query = Some(query.into());
        self
    }

    /// Set the abandon percentage, clamped to `0..=100`
    pub fn with_abandon_when_percentage_full(mut self, percentage: i64) -> Self {
        self.set_abandon_when_percentage_full(percentage);
        self
    }

    /// Set the interceptor chain text
    pub fn with_jdbc_interceptors(self, spec: impl Into<String>) -> Self {
        self.set_jdbc_interceptors(spec);
        self
    }

    /// Get the pool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the sweeper interval as a Duration
    pub fn time_between_eviction_runs(&self) -> Duration {
        Duration::from_millis(self.time_between_eviction_runs_ms)
    }

    /// Check if abandoned connection removal is enabled
    pub fn remove_abandoned(&self) -> bool {
        self.remove_abandoned
    }

    /// Get the abandoned connection timeout as a Duration
    pub fn remove_abandoned_timeout(&self) -> Duration {
        Duration::from_secs(self.remove_abandoned_timeout_secs)
    }

    /// Get the suspect connection timeout as a Duration
    pub fn suspect_timeout(&self) -> Duration {
        Duration::from_secs(self.suspect_timeout_secs)
    }

    /// Check if idle connections are validated
    pub fn test_while_idle(&self) -> bool {
        self.test_while_idle
    }

    /// Get the validation query if set
    pub fn validation_query(&self) -> Option<&str> {
        self.validation_query.as_deref()
    }

    /// Get the abandon percentage
    pub fn abandon_when_percentage_full(&self) -> u8 {
        self.abandon_when_percentage_full
    }

    /// Set the abandon percentage
    ///
    /// Any integer is accepted; values outside `0..=100` are saturated to
    /// the nearest bound.
    pub fn set_abandon_when_percentage_full(&mut self, percentage: i64) {
        self.abandon_when_percentage_full = clamp_percentage(percentage);
    }

    /// Get the interceptor chain text
    pub fn jdbc_interceptors(&self) -> Option<String> {
        self.interceptors.load().raw().map(str::to_string)
    }

    /// Replace the interceptor chain text
    ///
    /// The previous parse is discarded together with the old text; the next
    /// call to [`Self::interceptors`] parses the new text.
    pub fn set_jdbc_interceptors(&self, spec: impl Into<String>) {
        self.replace_chain(Some(spec.into()));
    }

    /// Remove the interceptor chain
    pub fn clear_jdbc_interceptors(&self) {
        self.replace_chain(None);
    }

    fn replace_chain(&self, raw: Option<String>) {
        self.interceptors.store(Arc::new(ChainSnapshot::new(raw)));
        tracing::debug!(pool = %self.name, "interceptor chain replaced");
    }

    /// Get the parsed interceptor chain
    ///
    /// Parsed on first access after each change and cached until the chain
    /// text is replaced.
    pub fn interceptors(
        &self,
    ) -> std::result::Result<Arc<Vec<InterceptorDefinition>>, ConfigFormatError> {
        self.interceptors.load().definitions()
    }

    /// Check whether the current chain text has already been parsed
    pub fn interceptors_cached(&self) -> bool {
        self.interceptors.load().is_parsed()
    }

    /// Parse the interceptor chain and resolve every entry, in order
    pub fn resolve_interceptors<R>(&self, resolver: &R) -> Result<Vec<R::Interceptor>>
    where
        R: InterceptorResolver,
    {
        let definitions = self.interceptors()?;
        resolver.resolve_chain(&definitions)
    }

    /// Get the raw vendor property blob as last configured
    pub fn connection_properties(&self) -> Option<&str> {
        self.connection_properties.as_deref()
    }

    /// Set the vendor property blob and merge it into the connection properties
    ///
    /// Keys already present are overwritten, others are kept. Nothing changes
    /// if the blob is malformed.
    pub fn set_connection_properties(
        &mut self,
        text: impl Into<String>,
    ) -> std::result::Result<(), ConfigFormatError> {
        let text = text.into();
        let parsed = parse_properties(Some(&text), None)?;
        self.db_properties.extend(parsed);
        self.connection_properties = Some(text);
        Ok(())
    }

    /// Get the vendor connection properties
    pub fn db_properties(&self) -> &PropertyMap {
        &self.db_properties
    }

    /// Get mutable access to the vendor connection properties
    pub fn db_properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.db_properties
    }

    /// Replace the vendor connection properties
    pub fn set_db_properties(&mut self, db_properties: PropertyMap) {
        self.db_properties = db_properties;
    }

    /// Check whether the pool needs its periodic maintenance sweeper
    ///
    /// True when the sweeper interval is positive and at least one of
    /// abandoned connection removal, suspect detection, or idle validation
    /// (with a validation query) is active.
    pub fn is_pool_sweeper_enabled(&self) -> bool {
        let timer = self.time_between_eviction_runs_ms > 0;
        let abandoned = self.remove_abandoned && self.remove_abandoned_timeout_secs > 0;
        let suspect = self.suspect_timeout_secs > 0;
        let idle_validation = self.test_while_idle && self.validation_query.is_some();
        timer && (abandoned || suspect || idle_validation)
    }
}

impl Default for PoolProperties {
    /// Create a default pool configuration
    ///
    /// Defaults:
    /// - time_between_eviction_runs: 5 seconds
    /// - remove_abandoned: false, after 60 seconds
    /// - suspect_timeout: disabled
    /// - test_while_idle: false, no validation query
    /// - abandon_when_percentage_full: 0
    /// - no interceptors, no connection properties
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_percentage(percentage: i64) -> u8 {
    percentage.clamp(0, 100) as u8
}

fn deserialize_percentage<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_percentage)
}

/// Serializes the chain snapshot as its raw text
mod chain_text {
    use std::sync::Arc;

    use arc_swap::ArcSwap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::pool::chain::ChainSnapshot;

    pub(super) fn is_unset(chain: &ArcSwap<ChainSnapshot>) -> bool {
        chain.load().raw().is_none()
    }

    pub(super) fn serialize<S>(
        chain: &ArcSwap<ChainSnapshot>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        chain.load().raw().serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<ArcSwap<ChainSnapshot>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(ArcSwap::new(Arc::new(ChainSnapshot::new(raw))))
    }
}
