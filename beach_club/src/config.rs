//! Aggregator configuration.
//!
//! Consolidates environment variable reads for the event aggregator.

use chrono::Duration;

/// Default cache lifetime in seconds
pub const DEFAULT_CACHE_TTL_SECS: i64 = 60;
/// Year band schedule dates resolve against
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;
/// Store key of the user-created tournament list
pub const DEFAULT_TOURNAMENTS_KEY: &str = "bags_tournaments";

/// Event aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// How long a load is reused
    pub cache_ttl: Duration,
    /// Year for `"<Month> <Day>"` schedule dates
    pub reference_year: i32,
    /// Fail the schedule source on unparsable dates instead of skipping them
    pub strict_dates: bool,
    /// Key holding the JSON array of scheduled tournaments
    pub tournaments_key: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::seconds(DEFAULT_CACHE_TTL_SECS),
            reference_year: DEFAULT_REFERENCE_YEAR,
            strict_dates: false,
            tournaments_key: DEFAULT_TOURNAMENTS_KEY.to_string(),
        }
    }
}

impl AggregatorConfig {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `EVENTS_CACHE_TTL_SECS`: Cache lifetime (default: 60)
    /// - `SCHEDULE_REFERENCE_YEAR`: Band schedule year (default: 2025)
    /// - `SCHEDULE_STRICT_DATES`: Reject unparsable schedule dates (default: false)
    /// - `BAGS_TOURNAMENTS_KEY`: Store key for tournaments (default: bags_tournaments)
    ///
    /// # Errors
    ///
    /// Returns error if a loaded value fails [`AggregatorConfig::validate`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let ttl_secs: i64 = parse_env_or("EVENTS_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS);
        let cache_ttl = Duration::try_seconds(ttl_secs).ok_or_else(|| ConfigError::Invalid {
            var: "EVENTS_CACHE_TTL_SECS".to_string(),
            reason: format!("{ttl_secs} seconds is out of range"),
        })?;

        let config = Self {
            cache_ttl,
            reference_year: parse_env_or("SCHEDULE_REFERENCE_YEAR", DEFAULT_REFERENCE_YEAR),
            strict_dates: parse_env_or("SCHEDULE_STRICT_DATES", false),
            tournaments_key: std::env::var("BAGS_TOURNAMENTS_KEY")
                .unwrap_or_else(|_| DEFAULT_TOURNAMENTS_KEY.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl < Duration::zero() {
            return Err(ConfigError::Invalid {
                var: "EVENTS_CACHE_TTL_SECS".to_string(),
                reason: "Must not be negative".to_string(),
            });
        }

        if !(1970..=9999).contains(&self.reference_year) {
            return Err(ConfigError::Invalid {
                var: "SCHEDULE_REFERENCE_YEAR".to_string(),
                reason: format!("{} is not a plausible year", self.reference_year),
            });
        }

        if self.tournaments_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "BAGS_TOURNAMENTS_KEY".to_string(),
                reason: "Must not be empty".to_string(),
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
}

/// Helper to parse environment variable with default fallback
pub fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
