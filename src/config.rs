//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// L1 cache budget in megabytes
    pub cache_size_mb: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Whether evictions are drained and logged by a background task
    pub log_evictions: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SIZE_MB` - L1 cache budget in megabytes (default: 1024)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `LOG_EVICTIONS` - Spawn the eviction logging task (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_size_mb: env_or("CACHE_SIZE_MB", defaults.cache_size_mb),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            log_evictions: env_or("LOG_EVICTIONS", defaults.log_evictions),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size_mb: 1024,
            server_port: 3000,
            log_evictions: true,
        }
    }
}

/// Parses an environment variable, falling back when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
