//! Payment gateway configuration

use serde::{Deserialize, Serialize};

/// Payment gateway (Antom) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway REST API
    pub base_url: String,

    /// Client identifier used for token authentication
    pub client_id: String,

    /// Private key paired with the client identifier
    pub private_key: String,

    /// Merchant identifier attached to payment creation
    pub merchant_id: String,

    /// Currency code for all charges (single-currency product)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Bearer token lifetime assumed for the gateway, in hours.
    /// The server issues 24h tokens; we refresh an hour early.
    #[serde(default = "default_token_lifetime_hours")]
    pub token_lifetime_hours: i64,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GATEWAY_BASE_URL")
                .unwrap_or_else(|_| String::from("https://gateway.example.com")),
            client_id: std::env::var("GATEWAY_CLIENT_ID").unwrap_or_default(),
            private_key: std::env::var("GATEWAY_PRIVATE_KEY").unwrap_or_default(),
            merchant_id: std::env::var("GATEWAY_MERCHANT_ID").unwrap_or_default(),
            currency: std::env::var("GATEWAY_CURRENCY")
                .unwrap_or_else(|_| default_currency()),
            token_lifetime_hours: std::env::var("GATEWAY_TOKEN_LIFETIME_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_token_lifetime_hours),
            request_timeout_secs: std::env::var("GATEWAY_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout_secs),
        }
    }

    /// Whether credentials are present (the gateway rejects empty ones anyway,
    /// but this lets the app surface a config problem before any network call)
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.private_key.is_empty()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://gateway.example.com"),
            client_id: String::new(),
            private_key: String::new(),
            merchant_id: String::new(),
            currency: default_currency(),
            token_lifetime_hours: default_token_lifetime_hours(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_currency() -> String {
    String::from("USD")
}

fn default_token_lifetime_hours() -> i64 {
    23
}

fn default_request_timeout_secs() -> u64 {
    30
}
