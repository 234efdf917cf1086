//! Error types for poolprops

use thiserror::Error;

/// Failure to structure configuration text.
///
/// Returned by the interceptor chain parser and the property blob parser.
/// Interceptor indices are zero-based positions in the `;`-separated chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigFormatError {
    #[error("interceptor #{index}: property `{token}` is missing `=`")]
    MalformedProperty { index: usize, token: String },

    #[error("interceptor #{index}: property `{token}` has an empty name")]
    EmptyPropertyName { index: usize, token: String },

    #[error("interceptor #{index}: empty interceptor name")]
    EmptyInterceptorName { index: usize },

    #[error("interceptor #{index}: unexpected text after `)` in `{token}`")]
    TrailingText { index: usize, token: String },

    #[error("property text line {line}: {reason}")]
    MalformedPropertyText { line: usize, reason: String },
}

/// Core error type for poolprops operations
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Configuration format error: {0}")]
    Format(#[from] ConfigFormatError),

    #[error("Interceptor not found: {0}")]
    InterceptorNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for poolprops operations
pub type Result<T> = std::result::Result<T, PoolError>;
