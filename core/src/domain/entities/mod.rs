//! Domain entities

pub mod payment;
pub mod template;
pub mod token;
pub mod video;

pub use payment::{
    CardDetails, CardFormInput, PaymentMethodType, PaymentRequest, PaymentStatus, PurchaseKind,
};
pub use template::{TemplateCategory, TemplateVideo};
pub use token::AuthToken;
pub use video::{VideoStatus, VideoTask};
