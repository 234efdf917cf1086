//! Interceptor chain parsing and resolution
//!
//! A chain is configured as a single string:
//!
//! ```text
//! chain       := interceptor (";" interceptor)*
//! interceptor := className ["(" property ("," property)* ")"]
//! property    := name "=" value
//! ```
//!
//! Neither `;` nor `,` can be escaped, so they cannot appear inside a class
//! name or a property value. Only the first `(` of an entry is significant,
//! which means property values cannot contain `(` either.
//!
//! # Example
//!
//! ```
//! use poolprops_connection::interceptors::parse_interceptor_chain;
//!
//! let chain = parse_interceptor_chain(Some("ConnectionState;SlowQueryReport(threshold=500)")).unwrap();
//! assert_eq!(chain.len(), 2);
//! assert_eq!(chain[1].property("threshold"), Some("500"));
//! ```

mod parser;
mod registry;


pub use parser::parse_interceptor_chain;
pub use registry::{InterceptorFactory, InterceptorRegistry};
