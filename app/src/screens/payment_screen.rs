//! Payment screen view-model.
//!
//! Ensures the payment session is initialized, then drives the card or
//! wallet flow. The submit button stays disabled while a flow is pending;
//! failures land in the error banner.

use std::sync::Arc;

use tracing::warn;

use vd_core::clients::{AuthTokenSource, BackendClient, PaymentGatewayClient};
use vd_core::domain::entities::{CardFormInput, PurchaseKind};
use vd_core::errors::{DomainError, DomainResult, PaymentError};
use vd_core::services::auth::PaymentSessionProvider;
use vd_core::services::payment::{CardFlowOutcome, PaymentService};
use vd_shared::types::ErrorResponse;

/// What the UI does after a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentScreenEvent {
    /// Tap ignored because a submission is already pending
    Ignored,
    /// Charge completed and recorded; show the success state
    Completed { payment_request_id: String },
    /// Gateway still processing; tell the user they will be notified
    Processing { payment_request_id: String },
    /// Open the externally hosted wallet page
    WalletRedirect { redirect_url: String },
    /// Charged but not recorded; the UI offers a confirmation retry
    ConfirmationPending {
        payment_request_id: String,
        message: String,
    },
    /// Flow failed; message is already in the banner
    Failed { message: String },
}

/// Payment screen state
pub struct PaymentScreen<S, G, B>
where
    S: AuthTokenSource,
    G: PaymentGatewayClient,
    B: BackendClient,
{
    session: Arc<PaymentSessionProvider<S>>,
    payments: Arc<PaymentService<G, B>>,
    user_id: String,
    submitting: bool,
    banner: Option<String>,
}

impl<S, G, B> PaymentScreen<S, G, B>
where
    S: AuthTokenSource,
    G: PaymentGatewayClient,
    B: BackendClient,
{
    pub fn new(
        session: Arc<PaymentSessionProvider<S>>,
        payments: Arc<PaymentService<G, B>>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            session,
            payments,
            user_id: user_id.into(),
            submitting: false,
            banner: None,
        }
    }

    /// Whether the submit button is disabled
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Current error banner text
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Submit the card form
    pub async fn submit_card(
        &mut self,
        purchase: &PurchaseKind,
        display_price: &str,
        form: &CardFormInput,
    ) -> PaymentScreenEvent {
        if self.submitting {
            return PaymentScreenEvent::Ignored;
        }
        self.submitting = true;
        self.banner = None;

        let result = self.run_card_flow(purchase, display_price, form).await;
        self.submitting = false;

        match result {
            Ok(CardFlowOutcome::Completed { payment_request_id }) => {
                PaymentScreenEvent::Completed { payment_request_id }
            }
            Ok(CardFlowOutcome::Processing { payment_request_id }) => {
                PaymentScreenEvent::Processing { payment_request_id }
            }
            Err(DomainError::Payment(PaymentError::ConfirmationPending {
                payment_request_id,
                message,
            })) => {
                warn!(
                    payment_request_id = %payment_request_id,
                    "purchase confirmation pending after completed charge"
                );
                self.banner = Some(message.clone());
                PaymentScreenEvent::ConfirmationPending {
                    payment_request_id,
                    message,
                }
            }
            Err(err) => self.fail(err),
        }
    }

    /// Start a wallet payment and hand the redirect URL to the host UI
    pub async fn submit_wallet(
        &mut self,
        purchase: &PurchaseKind,
        display_price: &str,
        wallet_type: &str,
    ) -> PaymentScreenEvent {
        if self.submitting {
            return PaymentScreenEvent::Ignored;
        }
        self.submitting = true;
        self.banner = None;

        let result = self
            .run_wallet_flow(purchase, display_price, wallet_type)
            .await;
        self.submitting = false;

        match result {
            Ok(redirect_url) => PaymentScreenEvent::WalletRedirect { redirect_url },
            Err(err) => self.fail(err),
        }
    }

    async fn run_card_flow(
        &self,
        purchase: &PurchaseKind,
        display_price: &str,
        form: &CardFormInput,
    ) -> DomainResult<CardFlowOutcome> {
        self.session.initialize().await?;
        self.payments
            .pay_with_card(&self.user_id, purchase, display_price, form)
            .await
    }

    async fn run_wallet_flow(
        &self,
        purchase: &PurchaseKind,
        display_price: &str,
        wallet_type: &str,
    ) -> DomainResult<String> {
        self.session.initialize().await?;
        let redirect = self
            .payments
            .pay_with_wallet(purchase, display_price, wallet_type)
            .await?;
        Ok(redirect.redirect_url)
    }

    fn fail(&mut self, err: DomainError) -> PaymentScreenEvent {
        let response = ErrorResponse::from(&err);
        warn!(code = %response.error, "payment flow failed");
        self.banner = Some(response.message.clone());
        PaymentScreenEvent::Failed {
            message: response.message,
        }
    }
}
