//! Error type definitions for authentication, payments, and video generation
//!
//! Every network failure is classified here at the call site; the screen
//! layer converts these into user-facing banner/alert messages. Nothing in
//! this taxonomy is fatal to the process.

use thiserror::Error;

use vd_shared::types::ErrorResponse;

/// Gateway authentication errors
///
/// Classification of token endpoint failures (HTTP 401/403/other status,
/// no response, transport error) plus the session provider's own states.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid gateway credentials")]
    InvalidCredentials,

    #[error("Gateway access forbidden")]
    Forbidden,

    #[error("Gateway returned status {status}: {message}")]
    GatewayStatus { status: u16, message: String },

    #[error("Network error reaching the gateway: {message}")]
    Network { message: String },

    #[error("Token request failed: {message}")]
    Request { message: String },

    #[error("Payment session is still initializing")]
    StillInitializing,

    #[error("Payment session initialization failed after {attempts} attempts: {last}")]
    InitializationFailed { attempts: u32, last: String },
}

/// Payment flow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Payment creation returned no payment request id")]
    MissingPaymentRequestId,

    #[error("Gateway rejected the request with status {status}: {message}")]
    Gateway { status: u16, message: String },

    #[error("Network error during payment: {message}")]
    Network { message: String },

    #[error("Payment processing failed: {message}")]
    ProcessingFailed { message: String },

    #[error("Unexpected payment status {status}{}", .result_code.as_ref().map(|c| format!(" (result code {})", c)).unwrap_or_default())]
    UnexpectedStatus {
        status: String,
        result_code: Option<String>,
    },

    /// The charge succeeded but recording the purchase did not. The caller
    /// must re-run confirmation for this payment request id; the backend
    /// confirm endpoints are idempotent on it.
    #[error("Payment {payment_request_id} completed but purchase confirmation failed: {message}")]
    ConfirmationPending {
        payment_request_id: String,
        message: String,
    },

    #[error("Malformed gateway response: {message}")]
    InvalidResponse { message: String },
}

/// Video generation and history errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    #[error("Backend returned status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Network error reaching the backend: {message}")]
    Network { message: String },

    #[error("Video {video_id} has no playable URL")]
    MissingVideoUrl { video_id: String },

    #[error("Not enough coins: {required} required, {balance} available")]
    InsufficientCoins { required: u32, balance: u32 },

    #[error("Malformed backend response: {message}")]
    InvalidResponse { message: String },
}

/// Local input validation errors; input never leaves the device
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Card number must be 13 to 19 digits")]
    InvalidCardNumber,

    #[error("Expiry must be MM/YY")]
    InvalidExpiryFormat,

    #[error("Card expiry is in the past")]
    ExpiredCard,

    #[error("Security code must be 3 or 4 digits")]
    InvalidCvc,

    #[error("Cardholder name is required")]
    MissingHolderName,

    #[error("Invalid amount: {input}")]
    InvalidAmount { input: String },

    #[error("Prompt text is required")]
    EmptyPrompt,
}

impl AuthError {
    /// Whether another initialization attempt could succeed. Credential and
    /// permission failures won't fix themselves; transient transport and
    /// server failures might.
    pub fn is_retryable(&self) -> bool {
        match self {
            AuthError::InvalidCredentials | AuthError::Forbidden => false,
            AuthError::GatewayStatus { .. }
            | AuthError::Network { .. }
            | AuthError::Request { .. } => true,
            AuthError::StillInitializing | AuthError::InitializationFailed { .. } => false,
        }
    }
}

impl AuthError {
    /// Error code for programmatic handling by the UI
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::GatewayStatus { .. } => "GATEWAY_STATUS",
            AuthError::Network { .. } => "NETWORK_ERROR",
            AuthError::Request { .. } => "REQUEST_ERROR",
            AuthError::StillInitializing => "STILL_INITIALIZING",
            AuthError::InitializationFailed { .. } => "INITIALIZATION_FAILED",
        }
    }
}

impl PaymentError {
    /// Error code for programmatic handling by the UI
    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::MissingPaymentRequestId => "MISSING_PAYMENT_REQUEST_ID",
            PaymentError::Gateway { .. } => "GATEWAY_REJECTED",
            PaymentError::Network { .. } => "NETWORK_ERROR",
            PaymentError::ProcessingFailed { .. } => "PROCESSING_FAILED",
            PaymentError::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            PaymentError::ConfirmationPending { .. } => "CONFIRMATION_PENDING",
            PaymentError::InvalidResponse { .. } => "INVALID_RESPONSE",
        }
    }
}

impl VideoError {
    /// Error code for programmatic handling by the UI
    pub fn error_code(&self) -> &'static str {
        match self {
            VideoError::Backend { .. } => "BACKEND_REJECTED",
            VideoError::Network { .. } => "NETWORK_ERROR",
            VideoError::MissingVideoUrl { .. } => "MISSING_VIDEO_URL",
            VideoError::InsufficientCoins { .. } => "INSUFFICIENT_COINS",
            VideoError::InvalidResponse { .. } => "INVALID_RESPONSE",
        }
    }
}

impl ValidationError {
    /// Error code for programmatic handling by the UI
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidCardNumber => "INVALID_CARD_NUMBER",
            ValidationError::InvalidExpiryFormat => "INVALID_EXPIRY_FORMAT",
            ValidationError::ExpiredCard => "EXPIRED_CARD",
            ValidationError::InvalidCvc => "INVALID_CVC",
            ValidationError::MissingHolderName => "MISSING_HOLDER_NAME",
            ValidationError::InvalidAmount { .. } => "INVALID_AMOUNT",
            ValidationError::EmptyPrompt => "EMPTY_PROMPT",
        }
    }
}

/// Convert AuthError to ErrorResponse
impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err)
    }
}

/// Convert PaymentError to ErrorResponse
impl From<&PaymentError> for ErrorResponse {
    fn from(err: &PaymentError) -> Self {
        ErrorResponse::new(err.error_code(), err)
    }
}

/// Convert VideoError to ErrorResponse
impl From<&VideoError> for ErrorResponse {
    fn from(err: &VideoError) -> Self {
        ErrorResponse::new(err.error_code(), err)
    }
}

/// Convert ValidationError to ErrorResponse
impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        ErrorResponse::new(err.error_code(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message_with_result_code() {
        let error = PaymentError::UnexpectedStatus {
            status: String::from("failed"),
            result_code: Some(String::from("DECLINED_BY_ISSUER")),
        };
        let message = error.to_string();
        assert!(message.contains("failed"));
        assert!(message.contains("DECLINED_BY_ISSUER"));
    }

    #[test]
    fn test_unexpected_status_message_without_result_code() {
        let error = PaymentError::UnexpectedStatus {
            status: String::from("failed"),
            result_code: None,
        };
        assert_eq!(error.to_string(), "Unexpected payment status failed");
    }

    #[test]
    fn test_auth_error_retryability() {
        assert!(!AuthError::InvalidCredentials.is_retryable());
        assert!(!AuthError::Forbidden.is_retryable());
        assert!(AuthError::Network { message: String::from("timeout") }.is_retryable());
        assert!(AuthError::GatewayStatus { status: 503, message: String::new() }.is_retryable());
    }

    #[test]
    fn test_confirmation_pending_names_the_payment() {
        let error = PaymentError::ConfirmationPending {
            payment_request_id: String::from("pr_123"),
            message: String::from("backend unavailable"),
        };
        assert!(error.to_string().contains("pr_123"));
    }
}
