//! Error types for breakpoint registration and subscription.

use thiserror::Error;

/// Result type for breakpoint operations.
pub type BreakpointResult<T> = Result<T, BreakpointError>;

/// Errors raised synchronously by the registry, the observer API and `init`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BreakpointError {
    /// Malformed input from an untrusted source (e.g. a config file).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A breakpoint with this key is already registered.
    #[error("breakpoint '{key}' already exists")]
    DuplicateKey { key: String },

    /// No breakpoint is registered under this key.
    #[error("breakpoint '{key}' is not registered")]
    NotFound { key: String },

    /// `init` was called without any breakpoints.
    #[error("at least one breakpoint is required for initialization")]
    EmptyInitialization,

    /// `init` was called while a resize signal is still bound.
    #[error("viewport is already initialized - call dispose() first")]
    AlreadyInitialized,
}

impl BreakpointError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn duplicate(key: &str) -> Self {
        Self::DuplicateKey {
            key: key.to_string(),
        }
    }

    pub(crate) fn not_found(key: &str) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }
}
