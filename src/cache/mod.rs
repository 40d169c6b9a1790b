//! Cache Module
//!
//! Provides a byte-budgeted in-memory cache with LRU eviction, eviction
//! notifications and live resizing.

mod entry;
mod listener;
mod sizer;
mod stats;
mod store;


// Re-export public types
pub use entry::EvictedItem;
pub use listener::{EvictListener, EVICT_CHANNEL_CAPACITY};
pub use sizer::CacheSizer;
pub use stats::CacheStats;
pub use store::L1Cache;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Bytes in one megabyte
pub const BYTES_IN_MB: u64 = 1024 * 1024;

/// Converts a size in megabytes to bytes.
pub fn mb_to_bytes(size_mb: u64) -> Result<u64> {
    size_mb
        .checked_mul(BYTES_IN_MB)
        .ok_or(CacheError::InvalidSize(size_mb))
}
