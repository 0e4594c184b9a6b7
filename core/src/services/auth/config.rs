//! Configuration for payment session initialization

use std::time::Duration;

/// Retry policy for gateway authentication
#[derive(Debug, Clone)]
pub struct SessionRetryConfig {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay between attempts
    pub retry_delay: Duration,
    /// How long a re-entrant caller waits before re-checking the state
    pub reentry_wait: Duration,
}

impl Default for SessionRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_secs(2),
            reentry_wait: Duration::from_secs(1),
        }
    }
}

impl SessionRetryConfig {
    /// Total authentication attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_config() {
        let config = SessionRetryConfig::default();
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.reentry_wait, Duration::from_secs(1));
    }
}
