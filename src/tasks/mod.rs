//! Background Tasks Module
//!
//! Contains background tasks that run alongside the server.
//!
//! # Tasks
//! - Eviction logging: Drains the cache's eviction listener

mod eviction;

pub use eviction::spawn_eviction_logger;
