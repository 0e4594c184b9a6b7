//! # Vidora App Layer
//!
//! The screen layer the native mobile shells bind to: view-model state for
//! the payment and video screens, display DTOs, and the assembly of the
//! full service stack. No rendering happens here; the host UI observes
//! screen state and calls the async operations.

pub mod bootstrap;
pub mod dto;
pub mod screens;
pub mod telemetry;

pub use bootstrap::{bootstrap, AppServices};
pub use screens::{
    CardFormState, ComposerAction, HistoryPanel, PaymentScreen, PaymentScreenEvent,
    VideoComposerScreen,
};
