//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, PaymentError, ValidationError, VideoError};

use thiserror::Error;

use vd_shared::types::ErrorResponse;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Video(#[from] VideoError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Convert any domain error into the UI-facing response shape
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Internal { .. } => ErrorResponse::new("INTERNAL_ERROR", err),
            DomainError::Auth(e) => e.into(),
            DomainError::Payment(e) => e.into(),
            DomainError::Video(e) => e.into(),
            DomainError::Validation(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_to_response_uses_the_specific_code() {
        let err = DomainError::Validation(ValidationError::ExpiredCard);
        let response = ErrorResponse::from(&err);
        assert_eq!(response.error, "EXPIRED_CARD");
        assert_eq!(response.message, "Card expiry is in the past");
    }

    #[test]
    fn test_reconcile_error_keeps_its_code() {
        let err = DomainError::Payment(PaymentError::ConfirmationPending {
            payment_request_id: String::from("pr_1"),
            message: String::from("backend unavailable"),
        });
        let response = ErrorResponse::from(&err);
        assert_eq!(response.error, "CONFIRMATION_PENDING");
        assert!(response.message.contains("pr_1"));
    }
}
