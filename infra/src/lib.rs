//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Vidora mobile
//! core. It provides the concrete implementations for the external
//! collaborators the domain services depend on:
//!
//! - **Gateway**: reqwest client for the payment gateway, plus the bearer
//!   token cache behind [`vd_core::clients::AuthTokenSource`]
//! - **Backend**: reqwest client for the app backend (purchase
//!   confirmation + video service)
//! - **Cache**: in-memory template cache with a freshness window

/// Backend REST API client
pub mod backend;

/// Template cache
pub mod cache;

/// Payment gateway client and token cache
pub mod gateway;

/// Shared HTTP plumbing (client construction, error body parsing)
pub mod http;

pub use backend::HttpBackendClient;
pub use cache::TemplateCache;
pub use gateway::{AntomGatewayClient, TokenCache};

use thiserror::Error;

/// Infrastructure-level errors (construction and configuration).
///
/// Request-path failures are classified into the domain taxonomy at the
/// call site instead; see `vd_core::errors`.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

/// Configuration loading for the whole app
pub mod app_config {
    //! Layered configuration: env-derived defaults, then `VIDORA__`-prefixed
    //! environment overrides. `.env` files are honored in development.

    use vd_shared::config::AppConfig;

    use crate::InfrastructureError;

    /// Load the full application configuration
    pub fn load() -> Result<AppConfig, InfrastructureError> {
        // Best-effort; a missing .env file is not an error
        dotenvy::dotenv().ok();

        let defaults = AppConfig::from_env();
        let settings = config::Config::builder()
            .add_source(
                config::Config::try_from(&defaults)
                    .map_err(|e| InfrastructureError::Config(e.to_string()))?,
            )
            .add_source(config::Environment::with_prefix("VIDORA").separator("__"))
            .build()
            .map_err(|e| InfrastructureError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| InfrastructureError::Config(e.to_string()))
    }

}
