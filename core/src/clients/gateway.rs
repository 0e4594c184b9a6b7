//! Payment gateway client interface.

use async_trait::async_trait;

use crate::domain::entities::{
    AuthToken, CardDetails, PaymentMethodType, PaymentRequest, PaymentStatus, PurchaseKind,
};
use crate::errors::DomainResult;
use vd_shared::types::PageRequest;

/// Source of gateway bearer tokens.
///
/// Implementations cache the token and refresh on demand; callers own any
/// retry policy.
#[async_trait]
pub trait AuthTokenSource: Send + Sync {
    /// Return a valid bearer token, fetching a fresh one only when the
    /// cached token is missing or expired.
    async fn authenticate(&self) -> DomainResult<AuthToken>;

    /// Drop the cached token (logout / credential rotation)
    async fn invalidate(&self);
}

/// Parameters for creating a payment request
#[derive(Debug, Clone)]
pub struct CreatePaymentRequest {
    /// Normalized positive amount
    pub amount: f64,
    /// Currency code
    pub currency: String,
    /// Card or wallet
    pub method: PaymentMethodType,
    /// What the payment pays for; sent as metadata
    pub purchase: PurchaseKind,
    /// Client-generated reference for reconciliation
    pub merchant_reference: String,
}

/// Gateway response to payment creation
#[derive(Debug, Clone, Default)]
pub struct CreatedPayment {
    /// Identifier of the payment request, when the gateway issued one
    pub payment_request_id: Option<String>,
}

/// Redirect target for wallet payments hosted outside the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRedirect {
    pub redirect_url: String,
}

/// One status observation for a payment request
#[derive(Debug, Clone)]
pub struct PaymentStatusSnapshot {
    pub id: String,
    pub status: PaymentStatus,
    /// Gateway result code accompanying terminal statuses, when supplied
    pub result_code: Option<String>,
}

/// Stateless operations against the payment gateway.
///
/// Implementations attach a bearer token from an [`AuthTokenSource`] to
/// every call.
#[async_trait]
pub trait PaymentGatewayClient: Send + Sync {
    /// `POST /payment/create`
    async fn create_payment(&self, request: &CreatePaymentRequest) -> DomainResult<CreatedPayment>;

    /// `POST /payment/process/card`
    async fn process_card_payment(
        &self,
        payment_request_id: &str,
        card: &CardDetails,
    ) -> DomainResult<()>;

    /// `POST /payment/process/wallet`
    async fn process_wallet_payment(
        &self,
        payment_request_id: &str,
        wallet_type: &str,
    ) -> DomainResult<WalletRedirect>;

    /// `GET /payment/status/{id}`
    async fn payment_status(&self, payment_request_id: &str)
        -> DomainResult<PaymentStatusSnapshot>;

    /// `POST /payment/cancel/{id}`
    async fn cancel_payment(&self, payment_request_id: &str) -> DomainResult<()>;

    /// `GET /payment/history`
    async fn payment_history(
        &self,
        page: PageRequest,
        status: Option<&str>,
    ) -> DomainResult<Vec<PaymentRequest>>;
}
