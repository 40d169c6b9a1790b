//! API Handlers
//!
//! HTTP request handlers for the ping, health and stats endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::L1Cache;
use crate::error::Result;
use crate::models::{HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shared L1 cache
    pub cache: Arc<L1Cache>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: L1Cache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails when the configured cache size does not fit in bytes.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let cache = L1Cache::new(config.cache_size_mb)?;
        Ok(Self::new(cache))
    }
}

/// Handler for GET /
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// Handler for GET /stats
///
/// Returns current cache counters and budget usage.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_ping_handler() {
        assert_eq!(ping_handler().await, "pong");
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = AppState::new(L1Cache::new(1).unwrap());
        state.cache.store("key", Bytes::from_static(b"value")).unwrap();
        state.cache.get("key");

        let response = stats_handler(State(state)).await;
        assert_eq!(response.stats.hits, 1);
        assert_eq!(response.stats.used_bytes, 5);
        assert_eq!(response.stats.item_count, 1);
        assert_eq!(response.hit_rate, 1.0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_state_from_config() {
        let config = crate::config::Config {
            cache_size_mb: 8,
            ..Default::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.cache.max_size_bytes(), 8 * 1_048_576);
    }

    #[test]
    fn test_state_from_invalid_config() {
        let config = crate::config::Config {
            cache_size_mb: u64::MAX,
            ..Default::default()
        };
        assert!(AppState::from_config(&config).is_err());
    }
}
