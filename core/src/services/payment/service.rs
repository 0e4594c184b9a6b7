//! Payment orchestration service.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::PaymentServiceConfig;
use crate::clients::{
    BackendClient, CreatePaymentRequest, PaymentGatewayClient, PaymentStatusSnapshot,
    WalletRedirect,
};
use crate::domain::entities::{
    CardDetails, CardFormInput, PaymentMethodType, PaymentRequest, PaymentStatus, PurchaseKind,
};
use crate::errors::{DomainResult, PaymentError, ValidationError};
use vd_shared::types::PageRequest;
use vd_shared::utils::amount;

/// Terminal outcome of the card flow as far as this screen observes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardFlowOutcome {
    /// Charge completed and the purchase was recorded
    Completed { payment_request_id: String },
    /// Gateway still processing; the user is notified later
    Processing { payment_request_id: String },
}

/// Orchestrates payments against the gateway and purchase confirmation
/// against the backend.
pub struct PaymentService<G, B>
where
    G: PaymentGatewayClient,
    B: BackendClient,
{
    gateway: Arc<G>,
    backend: Arc<B>,
    config: PaymentServiceConfig,
}

impl<G, B> PaymentService<G, B>
where
    G: PaymentGatewayClient,
    B: BackendClient,
{
    pub fn new(gateway: Arc<G>, backend: Arc<B>, config: PaymentServiceConfig) -> Self {
        Self {
            gateway,
            backend,
            config,
        }
    }

    /// Run the card flow: validate, create, process, observe status,
    /// confirm.
    ///
    /// Each step aborts the flow on failure. Validation failures never
    /// issue a network call. A confirmation failure after a completed
    /// charge surfaces as [`PaymentError::ConfirmationPending`]; re-running
    /// confirmation with the same payment request id is safe.
    pub async fn pay_with_card(
        &self,
        user_id: &str,
        purchase: &PurchaseKind,
        display_price: &str,
        form: &CardFormInput,
    ) -> DomainResult<CardFlowOutcome> {
        // Steps 1-2: local validation, nothing leaves the device on failure
        let card = CardDetails::parse(form)?;
        let amount = self.normalize_amount(display_price)?;

        // Step 3: create the payment request
        let payment_request_id = self
            .create_payment(amount, PaymentMethodType::Card, purchase)
            .await?;
        info!(
            payment_request_id = %payment_request_id,
            card = %card.masked_number(),
            amount,
            "submitting card payment"
        );

        // Step 4: submit the card against the payment request
        self.gateway
            .process_card_payment(&payment_request_id, &card)
            .await?;

        // Step 5: observe the status and settle the outcome
        let snapshot = self.observe_status(&payment_request_id).await?;
        match snapshot.status {
            PaymentStatus::Completed => {
                self.confirm_purchase(user_id, purchase, amount, &payment_request_id)
                    .await?;
                info!(payment_request_id = %payment_request_id, "purchase confirmed");
                Ok(CardFlowOutcome::Completed { payment_request_id })
            }
            PaymentStatus::Pending | PaymentStatus::Processing => {
                info!(
                    payment_request_id = %payment_request_id,
                    "payment still processing, user will be notified later"
                );
                Ok(CardFlowOutcome::Processing { payment_request_id })
            }
            other => {
                warn!(
                    payment_request_id = %payment_request_id,
                    status = other.label(),
                    "payment ended in an unexpected status"
                );
                Err(PaymentError::UnexpectedStatus {
                    status: other.label().to_string(),
                    result_code: snapshot.result_code,
                }
                .into())
            }
        }
    }

    /// Run the wallet flow up to the externally hosted payment page.
    ///
    /// Completion is not observed here; the backend reconciles the purchase
    /// out of band.
    pub async fn pay_with_wallet(
        &self,
        purchase: &PurchaseKind,
        display_price: &str,
        wallet_type: &str,
    ) -> DomainResult<WalletRedirect> {
        let amount = self.normalize_amount(display_price)?;

        let payment_request_id = self
            .create_payment(amount, PaymentMethodType::Wallet, purchase)
            .await?;
        info!(
            payment_request_id = %payment_request_id,
            wallet_type,
            "redirecting to hosted wallet payment"
        );

        self.gateway
            .process_wallet_payment(&payment_request_id, wallet_type)
            .await
    }

    /// One status observation for a payment request
    pub async fn payment_status(
        &self,
        payment_request_id: &str,
    ) -> DomainResult<PaymentStatusSnapshot> {
        self.gateway.payment_status(payment_request_id).await
    }

    /// Cancel a payment request that has not settled
    pub async fn cancel_payment(&self, payment_request_id: &str) -> DomainResult<()> {
        info!(payment_request_id, "cancelling payment");
        self.gateway.cancel_payment(payment_request_id).await
    }

    /// One page of the payment history listing
    pub async fn payment_history(
        &self,
        page: PageRequest,
        status: Option<&str>,
    ) -> DomainResult<Vec<PaymentRequest>> {
        self.gateway.payment_history(page, status).await
    }

    fn normalize_amount(&self, display_price: &str) -> Result<f64, ValidationError> {
        amount::parse_positive_amount(display_price).ok_or_else(|| ValidationError::InvalidAmount {
            input: display_price.to_string(),
        })
    }

    async fn create_payment(
        &self,
        amount: f64,
        method: PaymentMethodType,
        purchase: &PurchaseKind,
    ) -> DomainResult<String> {
        let created = self
            .gateway
            .create_payment(&CreatePaymentRequest {
                amount,
                currency: self.config.currency.clone(),
                method,
                purchase: purchase.clone(),
                merchant_reference: Uuid::new_v4().to_string(),
            })
            .await?;

        created
            .payment_request_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PaymentError::MissingPaymentRequestId.into())
    }

    /// Observe the payment status, re-polling non-terminal statuses while
    /// attempts remain.
    async fn observe_status(
        &self,
        payment_request_id: &str,
    ) -> DomainResult<PaymentStatusSnapshot> {
        let attempts = self.config.status_poll_attempts.max(1);
        let mut observation = 0u32;

        loop {
            observation += 1;
            let snapshot = self.gateway.payment_status(payment_request_id).await?;
            debug!(
                payment_request_id,
                observation,
                status = snapshot.status.label(),
                "payment status observed"
            );

            if snapshot.status.is_terminal() || observation >= attempts {
                return Ok(snapshot);
            }
            sleep(self.config.status_poll_interval).await;
        }
    }

    async fn confirm_purchase(
        &self,
        user_id: &str,
        purchase: &PurchaseKind,
        amount: f64,
        payment_request_id: &str,
    ) -> DomainResult<()> {
        let result = match purchase {
            PurchaseKind::Plan { plan_id } => {
                self.backend
                    .confirm_subscription(user_id, plan_id, amount, payment_request_id)
                    .await
            }
            PurchaseKind::Addon { addon_id } => {
                self.backend
                    .confirm_addon(user_id, addon_id, amount, payment_request_id)
                    .await
            }
        };

        // The charge already went through; flag the reconcile window
        // distinctly so the caller can re-run confirmation.
        result.map_err(|err| {
            warn!(
                payment_request_id,
                error = %err,
                "charge completed but purchase confirmation failed"
            );
            PaymentError::ConfirmationPending {
                payment_request_id: payment_request_id.to_string(),
                message: err.to_string(),
            }
            .into()
        })
    }
}
