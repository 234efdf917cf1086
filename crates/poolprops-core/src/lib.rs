//! poolprops Core - Shared types for connection pool configuration
//!
//! This crate provides the types every other poolprops crate depends on:
//!
//! - `InterceptorDefinition` - One parsed entry of an interceptor chain
//! - `InterceptorResolver` - Capability for turning definitions into interceptors
//! - `ConfigFormatError` / `PoolError` - Error types and the `Result` alias

mod error;
mod interceptor;

pub use error::*;
pub use interceptor::*;
