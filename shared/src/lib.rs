//! Shared utilities and common types for the Vidora mobile core
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Common type definitions (responses, pagination)
//! - Utility functions (card field validation, amount normalization)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, GatewayConfig, LoggingConfig, VideoServiceConfig,
};
pub use types::{ErrorResponse, PageRequest};
pub use utils::{amount, card};
