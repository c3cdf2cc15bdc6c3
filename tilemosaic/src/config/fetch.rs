//! Fetcher configuration.

use std::time::Duration;

use super::defaults::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_PARALLELISM, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECS,
};
use super::settings::FetchSettings;

/// Configuration for concurrent tile fetching.
///
/// # Example
///
/// ```
/// use tilemosaic::config::FetchConfig;
///
/// // Using defaults
/// let config = FetchConfig::default();
/// assert_eq!(config.parallelism(), 10);
/// assert_eq!(config.max_attempts(), 3);
///
/// // Custom configuration
/// let config = FetchConfig::new()
///     .with_parallelism(4)
///     .with_retry_delay_ms(250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Number of worker threads
    parallelism: usize,
    /// Attempts per tile, including the first request
    max_attempts: u32,
    /// Base pause between attempts (in milliseconds)
    retry_delay_ms: u64,
    /// HTTP request timeout (in seconds)
    timeout_secs: u64,
}

impl FetchConfig {
    /// Create a new fetch configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    ///
    /// Validated by the fetcher, which accepts 1 to 20. Default: 10.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Set the number of attempts per tile. Default: 3.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the base pause between attempts.
    ///
    /// The pause before attempt `n + 1` is `n * delay`. Default: 0.
    pub fn with_retry_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_delay_ms = delay_ms;
        self
    }

    /// Set the HTTP request timeout in seconds. Default: 30.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Pause to take after `failed_attempts` failures.
    pub fn retry_delay(&self, failed_attempts: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(failed_attempts as u64))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            parallelism: DEFAULT_PARALLELISM,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl From<&FetchSettings> for FetchConfig {
    fn from(settings: &FetchSettings) -> Self {
        Self::new()
            .with_parallelism(settings.parallelism)
            .with_max_attempts(settings.max_attempts)
            .with_retry_delay_ms(settings.retry_delay_ms)
            .with_timeout_secs(settings.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.parallelism(), DEFAULT_PARALLELISM);
        assert_eq!(config.max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.retry_delay_ms(), DEFAULT_RETRY_DELAY_MS);
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(FetchConfig::new(), FetchConfig::default());
    }

    #[test]
    fn test_with_parallelism() {
        let config = FetchConfig::new().with_parallelism(5);
        assert_eq!(config.parallelism(), 5);
        assert_eq!(config.max_attempts(), DEFAULT_MAX_ATTEMPTS); // Unchanged
    }

    #[test]
    fn test_builder_chain() {
        let config = FetchConfig::new()
            .with_parallelism(20)
            .with_max_attempts(2)
            .with_retry_delay_ms(100)
            .with_timeout_secs(5);

        assert_eq!(config.parallelism(), 20);
        assert_eq!(config.max_attempts(), 2);
        assert_eq!(config.retry_delay_ms(), 100);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_retry_delay_is_linear() {
        let config = FetchConfig::new().with_retry_delay_ms(100);
        assert_eq!(config.retry_delay(1), Duration::from_millis(100));
        assert_eq!(config.retry_delay(2), Duration::from_millis(200));
        assert_eq!(FetchConfig::new().retry_delay(2), Duration::ZERO);
    }

    #[test]
    fn test_from_settings() {
        let settings = FetchSettings {
            parallelism: 7,
            max_attempts: 1,
            retry_delay_ms: 50,
            timeout: 12,
        };
        let config = FetchConfig::from(&settings);
        assert_eq!(config.parallelism(), 7);
        assert_eq!(config.max_attempts(), 1);
        assert_eq!(config.retry_delay_ms(), 50);
        assert_eq!(config.timeout_secs(), 12);
    }
}
