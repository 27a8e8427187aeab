//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;

/// Default time-to-live for memoized fetch results, in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 10;

/// Default store address
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL of the key-value store
    pub redis_url: String,
    /// How long a fetched value remains cached, in seconds (0 disables caching)
    pub ttl_seconds: u64,
    /// Clear the store database when a connection is opened
    pub flush_on_start: bool,
    /// Interval in seconds between sweeps of the in-process store
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Store connection URL (default: redis://127.0.0.1:6379/)
    /// - `CACHE_TTL_SECONDS` - Fetch cache TTL in seconds (default: 10)
    /// - `FLUSH_ON_START` - Flush the database on connect (default: false)
    /// - `CLEANUP_INTERVAL` - In-process sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_SECONDS),
            flush_on_start: env::var("FLUSH_ON_START")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Returns a copy of this config with a different TTL.
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
            flush_on_start: false,
            cleanup_interval: 1,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379/");
        assert_eq!(config.ttl_seconds, 10);
        assert!(!config.flush_on_start);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("FLUSH_ON_START");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.redis_url, DEFAULT_REDIS_URL);
        assert_eq!(config.ttl_seconds, DEFAULT_TTL_SECONDS);
        assert!(!config.flush_on_start);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_with_ttl() {
        let config = Config::default().with_ttl(0);
        assert_eq!(config.ttl_seconds, 0);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
