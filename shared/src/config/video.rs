//! Video backend configuration

use serde::{Deserialize, Serialize};

/// Video generation backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoServiceConfig {
    /// Base URL of the backend REST API
    pub base_url: String,

    /// Items fetched per history page
    #[serde(default = "default_history_page_size")]
    pub history_page_size: u32,

    /// Template listing freshness window in hours
    #[serde(default = "default_template_ttl_hours")]
    pub template_ttl_hours: i64,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl VideoServiceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("VIDEO_API_BASE_URL")
                .unwrap_or_else(|_| String::from("https://api.example.com")),
            history_page_size: std::env::var("VIDEO_HISTORY_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_history_page_size),
            template_ttl_hours: std::env::var("VIDEO_TEMPLATE_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_template_ttl_hours),
            request_timeout_secs: std::env::var("VIDEO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout_secs),
        }
    }
}

impl Default for VideoServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://api.example.com"),
            history_page_size: default_history_page_size(),
            template_ttl_hours: default_template_ttl_hours(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_history_page_size() -> u32 {
    10
}

fn default_template_ttl_hours() -> i64 {
    24
}

fn default_request_timeout_secs() -> u64 {
    30
}
