//! Eviction Logging Task
//!
//! Background task that drains eviction notifications from the L1 cache.

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::EvictListener;

/// Spawns a task that logs every item published on `listener`.
///
/// The task ends once the cache owning the listener is dropped. Abort the
/// returned handle to stop it earlier.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(L1Cache::new(1024)?);
/// let handle = spawn_eviction_logger(cache.evict_listener());
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_eviction_logger(mut listener: EvictListener) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting eviction logging task");

        let mut evicted: u64 = 0;
        while let Some(item) = listener.recv().await {
            evicted += 1;
            debug!("Evicted '{}' ({} bytes)", item.key, item.size());
        }

        info!("Eviction listener closed after {} evictions", evicted);
    })
}
