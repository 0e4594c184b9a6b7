//! # Vidora Core
//!
//! Core business logic and domain layer for the Vidora mobile core.
//! This crate contains domain entities, business services, client
//! interfaces, and error types that form the foundation of the
//! application architecture.

pub mod clients;
pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use clients::{AuthTokenSource, BackendClient, PaymentGatewayClient};
pub use domain::entities::{
    AuthToken, CardDetails, CardFormInput, PaymentMethodType, PaymentRequest, PaymentStatus,
    PurchaseKind, TemplateCategory, TemplateVideo, VideoStatus, VideoTask,
};
pub use errors::{
    AuthError, DomainError, DomainResult, PaymentError, ValidationError, VideoError,
};
pub use services::{
    CardFlowOutcome, PaymentService, PaymentServiceConfig, PaymentSessionProvider,
    SessionRetryConfig, SessionState, VideoService,
};
