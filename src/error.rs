//! Error types for the L1 cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Store could not make room with a single eviction
    #[error("l1 cache is full")]
    CacheFull,

    /// Size in megabytes does not fit in a byte counter
    #[error("Invalid cache size: {0} MB")]
    InvalidSize(u64),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
