//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_MAX_SIZE};

/// Default TTL for property records and filter results, in seconds
pub const DEFAULT_TTL_SECS: u64 = 300;
/// Default TTL for search results, in seconds
pub const DEFAULT_SEARCH_TTL_SECS: u64 = 60;
/// Default TTL for statistics blobs, in seconds
pub const DEFAULT_STATISTICS_TTL_SECS: u64 = 900;

/// Property cache parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// When false every cache operation is a no-op
    pub enabled: bool,
    /// Maximum number of entries
    pub capacity: usize,
    /// Maximum cumulative declared size in bytes
    pub max_size: u64,
    /// TTL for property records and filter results; zero = no expiry
    pub default_ttl: Duration,
    /// TTL for search results; zero = no expiry
    pub search_ttl: Duration,
    /// TTL for statistics blobs; zero = no expiry
    pub statistics_ttl: Duration,
}

impl CacheConfig {
    /// Loads the cache parameters from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Enable caching (default: true)
    /// - `CACHE_CAPACITY` - Maximum entries (default: 1000)
    /// - `CACHE_MAX_SIZE` - Maximum cumulative bytes (default: 50 MiB)
    /// - `CACHE_DEFAULT_TTL` - Property/filter TTL in seconds (default: 300)
    /// - `CACHE_SEARCH_TTL` - Search TTL in seconds (default: 60)
    /// - `CACHE_STATISTICS_TTL` - Statistics TTL in seconds (default: 900)
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            capacity: positive_var("CACHE_CAPACITY").unwrap_or(DEFAULT_CAPACITY),
            max_size: positive_var("CACHE_MAX_SIZE").unwrap_or(DEFAULT_MAX_SIZE),
            default_ttl: secs_var("CACHE_DEFAULT_TTL", DEFAULT_TTL_SECS),
            search_ttl: secs_var("CACHE_SEARCH_TTL", DEFAULT_SEARCH_TTL_SECS),
            statistics_ttl: secs_var("CACHE_STATISTICS_TTL", DEFAULT_STATISTICS_TTL_SECS),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_CAPACITY,
            max_size: DEFAULT_MAX_SIZE,
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            search_ttl: Duration::from_secs(DEFAULT_SEARCH_TTL_SECS),
            statistics_ttl: Duration::from_secs(DEFAULT_STATISTICS_TTL_SECS),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Cache parameters
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - cache variables, see [`CacheConfig::from_env`]
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig::from_env(),
            server_port: positive_var("SERVER_PORT").unwrap_or(3000),
            cleanup_interval: positive_var("CLEANUP_INTERVAL").unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            cleanup_interval: 30,
        }
    }
}

// == Parsing Helpers ==
/// Parses common boolean spellings.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses a strictly positive number; zero, negative or garbage yield None.
fn parse_positive<T>(value: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|v| *v > T::default())
}

fn positive_var<T>(name: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    env::var(name).ok().and_then(|v| parse_positive(&v))
}

/// Reads a TTL in seconds. Zero is kept and means "no expiry".
fn secs_var(name: &str, default: u64) -> Duration {
    let secs = env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 30);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.capacity, 1000);
        assert_eq!(config.cache.max_size, 50 * 1024 * 1024);
        assert_eq!(config.cache.default_ttl, Duration::from_secs(300));
        assert_eq!(config.cache.search_ttl, Duration::from_secs(60));
        assert_eq!(config.cache.statistics_ttl, Duration::from_secs(900));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "CACHE_ENABLED",
            "CACHE_CAPACITY",
            "CACHE_MAX_SIZE",
            "CACHE_DEFAULT_TTL",
            "CACHE_SEARCH_TTL",
            "CACHE_STATISTICS_TTL",
            "SERVER_PORT",
            "CLEANUP_INTERVAL",
        ] {
            env::remove_var(name);
        }

        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" OFF "), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_parse_positive_rejects_non_positive() {
        assert_eq!(parse_positive::<usize>("250"), Some(250));
        assert_eq!(parse_positive::<usize>("0"), None);
        assert_eq!(parse_positive::<i64>("-5"), None);
        assert_eq!(parse_positive::<u64>("lots"), None);
    }
}
