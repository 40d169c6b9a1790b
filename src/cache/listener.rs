//! Eviction Listener Module
//!
//! Opt-in observer of cache evictions backed by a bounded broadcast channel.

use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing::warn;

use crate::cache::EvictedItem;

/// Number of pending notifications kept per listener before the oldest are
/// overwritten.
pub const EVICT_CHANNEL_CAPACITY: usize = 1000;

// == Evict Listener ==
/// Receives an [`EvictedItem`] for every eviction made after it was created.
///
/// Publishing never waits on a listener. A listener that falls more than
/// [`EVICT_CHANNEL_CAPACITY`] items behind loses the oldest notifications.
#[derive(Debug)]
pub struct EvictListener {
    receiver: broadcast::Receiver<EvictedItem>,
}

impl EvictListener {
    pub(crate) fn new(receiver: broadcast::Receiver<EvictedItem>) -> Self {
        Self { receiver }
    }

    // == Receive ==
    /// Waits for the next evicted item.
    ///
    /// Returns `None` once the cache has been dropped and every pending item
    /// was consumed.
    pub async fn recv(&mut self) -> Option<EvictedItem> {
        loop {
            match self.receiver.recv().await {
                Ok(item) => return Some(item),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Eviction listener lagged, {} notifications dropped", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    // == Try Receive ==
    /// Returns the next pending evicted item without waiting.
    pub fn try_recv(&mut self) -> Option<EvictedItem> {
        loop {
            match self.receiver.try_recv() {
                Ok(item) => return Some(item),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Eviction listener lagged, {} notifications dropped", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drains every pending evicted item.
    pub fn drain(&mut self) -> Vec<EvictedItem> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
