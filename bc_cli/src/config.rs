//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use beach_club::config::{AggregatorConfig, parse_env_or};
use std::path::PathBuf;

/// Default location of the JSON store
pub const DEFAULT_STORE_PATH: &str = "beach_club_store.json";

/// Default HTTP timeout for the events API
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Events API base URL; no API source when unset
    pub api_base_url: Option<String>,
    /// JSON file backing the key-value store
    pub store_path: PathBuf,
    /// Timeout for each events API request
    pub http_timeout_secs: u64,
    /// Calendar settings
    pub aggregator: AggregatorConfig,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `store_override` - Optional store path override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a loaded value is invalid
    pub fn from_env(store_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("EVENTS_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let store_path = store_override
            .or_else(|| std::env::var("BEACH_CLUB_STORE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let config = CliConfig {
            api_base_url,
            store_path,
            http_timeout_secs: parse_env_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
            aggregator: AggregatorConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.api_base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                var: "EVENTS_API_URL".to_string(),
                reason: format!("Must be an http(s) URL, got '{url}'"),
            });
        }

        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "BEACH_CLUB_STORE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "HTTP_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error(transparent)]
    Aggregator(#[from] beach_club::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "EVENTS_API_URL",
        "BEACH_CLUB_STORE",
        "HTTP_TIMEOUT_SECS",
        "EVENTS_CACHE_TTL_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    fn config() -> CliConfig {
        CliConfig {
            api_base_url: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            aggregator: AggregatorConfig::default(),
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = CliConfig::from_env(None).unwrap();
        assert_eq!(config.api_base_url, None);
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.http_timeout_secs, 10);
    }

    #[test]
    #[serial]
    fn test_env_values_and_override() {
        clear_env();
        unsafe {
            std::env::set_var("EVENTS_API_URL", "https://club.example.com/");
            std::env::set_var("BEACH_CLUB_STORE", "/tmp/from_env.json");
            std::env::set_var("HTTP_TIMEOUT_SECS", "3");
        }

        let config = CliConfig::from_env(None).unwrap();
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("https://club.example.com")
        );
        assert_eq!(config.store_path, PathBuf::from("/tmp/from_env.json"));
        assert_eq!(config.http_timeout_secs, 3);

        let config = CliConfig::from_env(Some(PathBuf::from("cli.json"))).unwrap();
        assert_eq!(config.store_path, PathBuf::from("cli.json"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_api_url_means_no_api() {
        clear_env();
        unsafe { std::env::set_var("EVENTS_API_URL", "   ") };
        let config = CliConfig::from_env(None).unwrap();
        assert_eq!(config.api_base_url, None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_aggregator_value_propagates() {
        clear_env();
        unsafe { std::env::set_var("EVENTS_CACHE_TTL_SECS", "-5") };
        let err = CliConfig::from_env(None).unwrap_err();
        assert!(matches!(err, ConfigError::Aggregator(_)));
        clear_env();
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let mut config = config();
        config.api_base_url = Some("ftp://club".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("EVENTS_API_URL"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = config();
        config.http_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
