//! Configuration for payment orchestration

use std::time::Duration;

/// Payment orchestration settings
#[derive(Debug, Clone)]
pub struct PaymentServiceConfig {
    /// Currency code for all charges
    pub currency: String,

    /// Status observations after card processing. One observation matches
    /// the shipped behavior; raising it re-polls non-terminal statuses.
    pub status_poll_attempts: u32,

    /// Delay between status observations when polling more than once
    pub status_poll_interval: Duration,
}

impl PaymentServiceConfig {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Default::default()
        }
    }
}

impl Default for PaymentServiceConfig {
    fn default() -> Self {
        Self {
            currency: String::from("USD"),
            status_poll_attempts: 1,
            status_poll_interval: Duration::from_secs(2),
        }
    }
}
