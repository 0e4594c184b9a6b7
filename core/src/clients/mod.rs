//! Client interfaces for external collaborators
//!
//! The services in this crate depend on these traits; `vd_infra` provides
//! the reqwest implementations. Tests substitute mocks.

pub mod backend;
pub mod gateway;

pub use backend::{BackendClient, CreateVideoRequest};
pub use gateway::{
    AuthTokenSource, CreatePaymentRequest, CreatedPayment, PaymentGatewayClient,
    PaymentStatusSnapshot, WalletRedirect,
};
