//! L1 Cache Store Module
//!
//! Main cache engine combining a recency-ordered table with byte-budget
//! accounting and eviction notifications.

use bytes::Bytes;
use lru::LruCache;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::cache::{
    mb_to_bytes, CacheSizer, CacheStats, EvictListener, EvictedItem, EVICT_CHANNEL_CAPACITY,
};
use crate::error::{CacheError, Result};

/// State guarded by the cache lock.
#[derive(Debug)]
struct Inner {
    /// Values ordered from most to least recently used. Item count is
    /// unbounded; the byte budget is enforced through the sizer.
    table: LruCache<String, Bytes>,
    stats: CacheStats,
}

// == L1 Cache ==
/// Byte-budgeted LRU cache for opaque binary values.
///
/// A store that does not fit evicts at most one least-recently-used entry,
/// and only when that entry is at least as large as the new value. Every
/// eviction is published to listeners obtained from
/// [`L1Cache::evict_listener`].
///
/// All methods take `&self`; share the cache between threads with `Arc`.
#[derive(Debug)]
pub struct L1Cache {
    inner: Mutex<Inner>,
    /// Mutated only while `inner` is locked
    sizer: CacheSizer,
    evictions: broadcast::Sender<EvictedItem>,
}

impl L1Cache {
    // == Constructor ==
    /// Creates an empty cache with a budget of `max_size_mb` megabytes.
    pub fn new(max_size_mb: u64) -> Result<Self> {
        Ok(Self::with_max_bytes(mb_to_bytes(max_size_mb)?))
    }

    pub(crate) fn with_max_bytes(max_bytes: u64) -> Self {
        let (evictions, _) = broadcast::channel(EVICT_CHANNEL_CAPACITY);
        Self {
            inner: Mutex::new(Inner {
                table: LruCache::unbounded(),
                stats: CacheStats::new(),
            }),
            sizer: CacheSizer::new(max_bytes),
            evictions,
        }
    }

    // == Store ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// A value already stored under `key` is replaced; its bytes are released
    /// first and it is not reported as an eviction. When the budget cannot
    /// hold the value, the least recently used entry is evicted if it is at
    /// least as large as `value`, otherwise [`CacheError::CacheFull`] is
    /// returned and `key` is left absent.
    pub fn store(&self, key: impl Into<String>, value: impl Into<Bytes>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        let size = value.len() as u64;

        let evicted = {
            let mut inner = self.inner.lock();

            if let Some(previous) = inner.table.pop(&key) {
                self.sizer.remove(previous.len() as u64);
            }

            let evicted = if self.sizer.can_add_without_evicting(size) {
                None
            } else {
                let oldest_size = match inner.table.peek_lru() {
                    Some((_, oldest)) => oldest.len() as u64,
                    None => {
                        debug!("Store of '{}' ({} bytes) rejected, nothing to evict", key, size);
                        return Err(CacheError::CacheFull);
                    }
                };
                if oldest_size < size {
                    debug!(
                        "Store of '{}' ({} bytes) rejected, oldest entry holds {} bytes",
                        key, size, oldest_size
                    );
                    return Err(CacheError::CacheFull);
                }

                let Some((old_key, old_value)) = inner.table.pop_lru() else {
                    return Err(CacheError::CacheFull);
                };
                self.sizer.remove(old_value.len() as u64);
                inner.stats.record_eviction();
                debug!("Evicted '{}' ({} bytes) to store '{}'", old_key, old_value.len(), key);
                Some(EvictedItem::new(old_key, old_value))
            };

            inner.table.put(key, value);
            self.sizer.add(size);
            evicted
        };

        self.publish(evicted);
        Ok(())
    }

    // == Get ==
    /// Returns the value stored under `key` and marks it most recently used.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let mut inner = self.inner.lock();
        let value = inner.table.get(key).cloned();
        match value {
            Some(value) => {
                inner.stats.record_hit();
                Some(value)
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Purge ==
    /// Removes every entry without notifying listeners. The budget is kept.
    pub fn purge(&self) {
        let mut inner = self.inner.lock();
        let purged = inner.table.len();
        inner.table.clear();
        self.sizer.purge();
        info!("L1 cache purged, {} entries dropped", purged);
    }

    // == Resize ==
    /// Changes the budget to `size_mb` megabytes.
    ///
    /// Growing never evicts. Shrinking evicts least recently used entries
    /// until at least the difference between the old and new budget has been
    /// freed or the cache is empty.
    pub fn resize(&self, size_mb: u64) -> Result<()> {
        let max_bytes = mb_to_bytes(size_mb)?;
        self.resize_bytes(max_bytes);
        Ok(())
    }

    pub(crate) fn resize_bytes(&self, max_bytes: u64) {
        let evicted = {
            let mut inner = self.inner.lock();
            let current = self.sizer.max_bytes();

            if max_bytes >= current {
                self.sizer.resize(max_bytes);
                info!("L1 cache grown from {} to {} bytes", current, max_bytes);
                return;
            }

            let delta = current - max_bytes;
            let mut freed = 0u64;
            let mut evicted = Vec::new();
            while freed < delta {
                let Some((key, value)) = inner.table.pop_lru() else {
                    break;
                };
                let size = value.len() as u64;
                self.sizer.remove(size);
                inner.stats.record_eviction();
                freed += size;
                evicted.push(EvictedItem::new(key, value));
            }
            self.sizer.resize(max_bytes);

            info!(
                "L1 cache shrunk from {} to {} bytes, evicted {} entries ({} bytes)",
                current,
                max_bytes,
                evicted.len(),
                freed
            );
            evicted
        };

        self.publish(evicted);
    }

    // == Max Size ==
    /// Returns the current budget in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.sizer.max_bytes()
    }

    // == Evict Listener ==
    /// Subscribes to evictions made from now on.
    pub fn evict_listener(&self) -> EvictListener {
        EvictListener::new(self.evictions.subscribe())
    }

    // == Introspection ==
    /// Returns the sum of stored value lengths.
    pub fn used_bytes(&self) -> u64 {
        self.sizer.used_bytes()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().table.is_empty()
    }

    /// Returns a snapshot of counters and budget usage.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            used_bytes: self.sizer.used_bytes(),
            item_count: self.sizer.item_count(),
            max_bytes: self.sizer.max_bytes(),
            ..inner.stats.clone()
        }
    }

    /// Sends evicted items to listeners. Called without the lock held.
    fn publish(&self, evicted: impl IntoIterator<Item = EvictedItem>) {
        if self.evictions.receiver_count() == 0 {
            return;
        }
        for item in evicted {
            // Only fails when every listener was dropped meanwhile
            let _ = self.evictions.send(item);
        }
    }

    #[cfg(test)]
    pub(crate) fn stored_bytes(&self) -> u64 {
        self.inner
            .lock()
            .table
            .iter()
            .map(|(_, value)| value.len() as u64)
            .sum()
    }
}
