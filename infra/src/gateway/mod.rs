//! Payment gateway integration
//!
//! `TokenCache` owns the bearer token lifecycle; `AntomGatewayClient`
//! implements the payment operations, attaching a token to every call.

mod client;
mod token_cache;

pub use client::AntomGatewayClient;
pub use token_cache::TokenCache;
