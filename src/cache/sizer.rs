//! Cache Sizer Module
//!
//! Byte and item accounting against a mutable ceiling.

use std::sync::atomic::{AtomicU64, Ordering};

// == Cache Sizer ==
/// Tracks bytes used and item count for the L1 cache.
///
/// Every counter is atomic so the sizer can be read and mutated from any
/// thread. The cache only mutates it while holding its table lock, which keeps
/// the counters paired with the table contents.
#[derive(Debug, Default)]
pub struct CacheSizer {
    /// Sum of value lengths currently stored
    used_bytes: AtomicU64,
    /// Ceiling in bytes
    max_bytes: AtomicU64,
    /// Number of stored values
    item_count: AtomicU64,
}

impl CacheSizer {
    // == Constructor ==
    /// Creates an empty sizer with the given ceiling in bytes.
    pub fn new(max_bytes: u64) -> Self {
        Self {
            used_bytes: AtomicU64::new(0),
            max_bytes: AtomicU64::new(max_bytes),
            item_count: AtomicU64::new(0),
        }
    }

    // == Can Add Without Evicting ==
    /// Returns true if `size` more bytes stay strictly below the ceiling.
    ///
    /// A write that would exactly fill the budget needs an eviction.
    pub fn can_add_without_evicting(&self, size: u64) -> bool {
        self.used_bytes
            .load(Ordering::Acquire)
            .saturating_add(size)
            < self.max_bytes.load(Ordering::Acquire)
    }

    // == Add ==
    /// Accounts for one new item of `size` bytes.
    pub fn add(&self, size: u64) {
        self.used_bytes.fetch_add(size, Ordering::AcqRel);
        self.item_count.fetch_add(1, Ordering::AcqRel);
    }

    // == Remove ==
    /// Releases one item of `size` bytes.
    ///
    /// `size` must match a size previously passed to [`CacheSizer::add`].
    pub fn remove(&self, size: u64) {
        self.used_bytes.fetch_sub(size, Ordering::AcqRel);
        self.item_count.fetch_sub(1, Ordering::AcqRel);
    }

    // == Purge ==
    /// Resets usage to zero. The ceiling is left untouched.
    pub fn purge(&self) {
        self.used_bytes.store(0, Ordering::Release);
        self.item_count.store(0, Ordering::Release);
    }

    // == Resize ==
    /// Replaces the ceiling. Never evicts by itself.
    pub fn resize(&self, max_bytes: u64) {
        self.max_bytes.store(max_bytes, Ordering::Release);
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes.load(Ordering::Acquire)
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes.load(Ordering::Acquire)
    }

    pub fn item_count(&self) -> u64 {
        self.item_count.load(Ordering::Acquire)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sizer_new() {
        let sizer = CacheSizer::new(100);
        assert_eq!(sizer.used_bytes(), 0);
        assert_eq!(sizer.item_count(), 0);
        assert_eq!(sizer.max_bytes(), 100);
    }

    #[test]
    fn test_can_add_is_strict() {
        let sizer = CacheSizer::new(100);
        assert!(sizer.can_add_without_evicting(99));
        // Exactly filling the budget needs eviction
        assert!(!sizer.can_add_without_evicting(100));

        sizer.add(60);
        assert!(sizer.can_add_without_evicting(39));
        assert!(!sizer.can_add_without_evicting(40));
    }

    #[test]
    fn test_add_and_remove() {
        let sizer = CacheSizer::new(100);
        sizer.add(10);
        sizer.add(20);
        assert_eq!(sizer.used_bytes(), 30);
        assert_eq!(sizer.item_count(), 2);

        sizer.remove(10);
        assert_eq!(sizer.used_bytes(), 20);
        assert_eq!(sizer.item_count(), 1);
    }

    #[test]
    fn test_purge_keeps_ceiling() {
        let sizer = CacheSizer::new(100);
        sizer.add(50);
        sizer.purge();

        assert_eq!(sizer.used_bytes(), 0);
        assert_eq!(sizer.item_count(), 0);
        assert_eq!(sizer.max_bytes(), 100);
    }

    #[test]
    fn test_resize_does_not_touch_usage() {
        let sizer = CacheSizer::new(100);
        sizer.add(80);
        sizer.resize(50);

        assert_eq!(sizer.max_bytes(), 50);
        assert_eq!(sizer.used_bytes(), 80);
        assert!(!sizer.can_add_without_evicting(0));
    }

    #[test]
    fn test_zero_ceiling_never_fits() {
        let sizer = CacheSizer::new(0);
        assert!(!sizer.can_add_without_evicting(0));
    }

    #[test]
    fn test_concurrent_add_remove() {
        let sizer = Arc::new(CacheSizer::new(u64::MAX));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sizer = Arc::clone(&sizer);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        sizer.add(3);
                    }
                    for _ in 0..500 {
                        sizer.remove(3);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sizer.item_count(), 8 * 500);
        assert_eq!(sizer.used_bytes(), 8 * 500 * 3);
    }
}
