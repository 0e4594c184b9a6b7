//! Payment session initialization
//!
//! This module owns the lazy gateway-authentication state machine the
//! payment screens consult before any payment call:
//! - Idempotent `initialize` with bounded, awaited retries
//! - Re-entrant calls observe the in-flight attempt instead of starting
//!   a second one
//! - Per-instance state, scoped to the screen tree that created it

mod config;
mod provider;

#[cfg(test)]
mod tests;

pub use config::SessionRetryConfig;
pub use provider::{PaymentSessionProvider, SessionState};
