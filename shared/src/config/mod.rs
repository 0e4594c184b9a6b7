//! Configuration types shared across the workspace
//!
//! Each external collaborator gets its own config struct with defaults and
//! a `from_env` constructor. `AppConfig` aggregates them for the host shell.

pub mod environment;
pub mod gateway;
pub mod video;

pub use environment::{Environment, LoggingConfig};
pub use gateway::GatewayConfig;
pub use video::VideoServiceConfig;

use serde::{Deserialize, Serialize};

/// Complete application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Runtime environment
    #[serde(default)]
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Payment gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Video backend configuration
    #[serde(default)]
    pub video: VideoServiceConfig,
}

impl AppConfig {
    /// Assemble the full configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            gateway: GatewayConfig::from_env(),
            video: VideoServiceConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            logging: LoggingConfig::default(),
            gateway: GatewayConfig::default(),
            video: VideoServiceConfig::default(),
        }
    }
}
