//! Evicted Item Module
//!
//! Defines the notification payload published for every eviction.

use bytes::Bytes;

// == Evicted Item ==
/// A key/value pair removed from the cache to free budget.
///
/// The item owns its key and a handle to the evicted bytes; it holds no
/// reference back into the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictedItem {
    /// Key the value was stored under
    pub key: String,
    /// The evicted value
    pub value: Bytes,
}

impl EvictedItem {
    // == Constructor ==
    pub fn new(key: String, value: Bytes) -> Self {
        Self { key, value }
    }

    /// Size of the evicted value in bytes.
    pub fn size(&self) -> usize {
        self.value.len()
    }
}
