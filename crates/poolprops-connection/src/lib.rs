//! poolprops Connection - Connection pool configuration
//!
//! This crate holds the pool configuration object and the two text formats
//! it accepts: the interceptor chain and the vendor property blob.

pub mod interceptors;
pub mod pool;
pub mod properties;

pub use interceptors::{InterceptorFactory, InterceptorRegistry, parse_interceptor_chain};
pub use pool::PoolProperties;
pub use properties::{merge_properties, parse_properties};
