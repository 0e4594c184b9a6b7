//! Payment orchestration
//!
//! Drives the card flow end to end (validate, create, process, poll,
//! confirm) and the wallet flow up to the external redirect.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::PaymentServiceConfig;
pub use service::{CardFlowOutcome, PaymentService};
