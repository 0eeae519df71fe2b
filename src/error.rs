//! Error types for the bounded cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and configuration.
///
/// Lookups never fail: a miss is reported as `None`, not as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Builder finished without a key-equality predicate
    #[error("Key predicate not configured")]
    PredicateNotConfigured,

    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    /// Configuration value could not be parsed
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::PredicateNotConfigured.to_string(),
            "Key predicate not configured"
        );
        assert_eq!(
            CacheError::InvalidCapacity(0).to_string(),
            "Invalid capacity: 0 (must be greater than zero)"
        );
        assert_eq!(
            CacheError::InvalidConfig("CACHE_CAPACITY=abc".to_string()).to_string(),
            "Invalid config: CACHE_CAPACITY=abc"
        );
    }
}
