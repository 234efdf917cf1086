//! Connection pool configuration
//!
//! This module provides [`PoolProperties`], the configuration object a pool
//! reads at startup and its maintenance threads read afterwards. It owns the
//! raw interceptor chain text and vendor connection properties, and hands out
//! parsed forms of both.
//!
//! # Example
//!
//! ```
//! use poolprops_connection::pool::PoolProperties;
//!
//! let props = PoolProperties::new()
//!     .with_time_between_eviction_runs_ms(5000)
//!     .with_suspect_timeout_secs(30)
//!     .with_jdbc_interceptors("ConnectionState;SlowQueryReport(threshold=500)");
//!
//! assert!(props.is_pool_sweeper_enabled());
//! assert_eq!(props.interceptors().unwrap().len(), 2);
//! ```

mod chain;
mod config;


pub use config::PoolProperties;
