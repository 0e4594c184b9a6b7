//! Business services

pub mod auth;
pub mod payment;
pub mod video;

pub use auth::{PaymentSessionProvider, SessionRetryConfig, SessionState};
pub use payment::{CardFlowOutcome, PaymentService, PaymentServiceConfig};
pub use video::{
    AttachedImage, GenerationInput, GenerationMode, GenerationPlan, HistoryPage, VideoService,
};
