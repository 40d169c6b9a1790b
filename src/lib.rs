//! L1 Cache - A byte-budgeted in-memory cache
//!
//! Stores opaque binary values under an LRU policy with a single eviction per
//! store, eviction notifications and live resizing of the byte budget.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{EvictListener, EvictedItem, L1Cache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_eviction_logger;
