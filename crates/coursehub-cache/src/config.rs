//! Cache configuration.

use std::env;
use std::time::Duration;

/// Cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `CACHE_TTL_SECONDS`: lifetime of a cached entry (default: `300`)
/// - `CACHE_SWEEP_INTERVAL_SECONDS`: period of the eviction sweep (default: `60`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub sweep_interval: Duration,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
            sweep_interval: env::var("CACHE_SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
        }
    }
}
