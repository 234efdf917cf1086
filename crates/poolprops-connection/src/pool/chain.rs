//! Raw interceptor chain text paired with its lazily parsed form

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use poolprops_core::{ConfigFormatError, InterceptorDefinition};

use crate::interceptors::parse_interceptor_chain;

/// One version of the configured interceptor chain.
///
/// A snapshot is never mutated in place except for publishing its parse, so
/// a cached parse always belongs to the text stored beside it. Replacing the
/// chain means swapping in a whole new snapshot.
#[derive(Debug, Default)]
pub(crate) struct ChainSnapshot {
    raw: Option<String>,
    parsed: ArcSwapOption<Vec<InterceptorDefinition>>,
}

impl ChainSnapshot {
    pub(crate) fn new(raw: Option<String>) -> Self {
        Self {
            raw,
            parsed: ArcSwapOption::empty(),
        }
    }

    pub(crate) fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub(crate) fn is_parsed(&self) -> bool {
        self.parsed.load().is_some()
    }

    /// Parse on first use, then serve the published result.
    ///
    /// Concurrent first reads may each parse; the results are identical and
    /// only complete vectors are ever stored.
    pub(crate) fn definitions(
        &self,
    ) -> Result<Arc<Vec<InterceptorDefinition>>, ConfigFormatError> {
        if let Some(cached) = self.parsed.load_full() {
            return Ok(cached);
        }

        let parsed = Arc::new(parse_interceptor_chain(self.raw())?);
        self.parsed.store(Some(Arc::clone(&parsed)));
        Ok(parsed)
    }
}
