//! Payment gateway (Antom) REST client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::{http, InfrastructureError};
use vd_core::clients::{
    AuthTokenSource, CreatePaymentRequest, CreatedPayment, PaymentGatewayClient,
    PaymentStatusSnapshot, WalletRedirect,
};
use vd_core::domain::entities::{
    CardDetails, PaymentMethodType, PaymentRequest, PaymentStatus, PurchaseKind,
};
use vd_core::errors::{DomainError, DomainResult, PaymentError};
use vd_shared::config::GatewayConfig;
use vd_shared::types::PageRequest;

#[derive(Serialize)]
struct PaymentMetadata<'a> {
    #[serde(rename = "planId", skip_serializing_if = "Option::is_none")]
    plan_id: Option<&'a str>,
    #[serde(rename = "addonId", skip_serializing_if = "Option::is_none")]
    addon_id: Option<&'a str>,
}

impl<'a> From<&'a PurchaseKind> for PaymentMetadata<'a> {
    fn from(purchase: &'a PurchaseKind) -> Self {
        match purchase {
            PurchaseKind::Plan { plan_id } => Self {
                plan_id: Some(plan_id),
                addon_id: None,
            },
            PurchaseKind::Addon { addon_id } => Self {
                plan_id: None,
                addon_id: Some(addon_id),
            },
        }
    }
}

#[derive(Serialize)]
struct CreatePaymentBody<'a> {
    merchant_id: &'a str,
    amount: f64,
    currency: &'a str,
    payment_method_type: &'a str,
    metadata: PaymentMetadata<'a>,
    merchant_reference: &'a str,
}

#[derive(Deserialize)]
struct CreatePaymentResponse {
    #[serde(alias = "paymentRequestId")]
    payment_request_id: Option<String>,
}

#[derive(Serialize)]
struct CardWire<'a> {
    number: &'a str,
    expiry: String,
    cvc: &'a str,
    holder_name: &'a str,
}

#[derive(Serialize)]
struct ProcessCardBody<'a> {
    payment_request_id: &'a str,
    card: CardWire<'a>,
}

#[derive(Serialize)]
struct ProcessWalletBody<'a> {
    payment_request_id: &'a str,
    wallet_type: &'a str,
}

#[derive(Deserialize)]
struct ProcessWalletResponse {
    #[serde(alias = "redirectUrl")]
    redirect_url: Option<String>,
}

#[derive(Deserialize)]
struct PaymentStatusResponse {
    id: Option<String>,
    status: String,
    #[serde(alias = "resultCode")]
    result_code: Option<String>,
}

#[derive(Deserialize)]
struct HistoryItem {
    id: String,
    amount: f64,
    currency: String,
    #[serde(default, alias = "paymentMethodType")]
    payment_method_type: String,
    status: String,
    #[serde(default, alias = "resultCode")]
    result_code: Option<String>,
}

impl From<HistoryItem> for PaymentRequest {
    fn from(item: HistoryItem) -> Self {
        PaymentRequest {
            id: item.id,
            amount: item.amount,
            currency: item.currency,
            method_type: PaymentMethodType::from_raw(&item.payment_method_type)
                .unwrap_or(PaymentMethodType::Card),
            status: PaymentStatus::from_raw(&item.status),
            result_code: item.result_code,
        }
    }
}

#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(alias = "items")]
    payments: Vec<HistoryItem>,
}

/// reqwest-backed gateway client; every call carries a bearer token from
/// the injected token source.
pub struct AntomGatewayClient<T: AuthTokenSource> {
    config: GatewayConfig,
    tokens: Arc<T>,
    http: reqwest::Client,
}

impl<T: AuthTokenSource> AntomGatewayClient<T> {
    pub fn new(config: GatewayConfig, tokens: Arc<T>) -> Result<Self, InfrastructureError> {
        let http = http::build_client(config.request_timeout_secs)?;
        Ok(Self {
            config,
            tokens,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn bearer(&self) -> DomainResult<String> {
        Ok(self.tokens.authenticate().await?.value)
    }

    /// Send a gateway request and map failures into the payment taxonomy
    async fn send(&self, request: reqwest::RequestBuilder) -> DomainResult<reqwest::Response> {
        let response = request.send().await.map_err(|err| {
            if http::is_network_error(&err) {
                DomainError::Payment(PaymentError::Network {
                    message: err.to_string(),
                })
            } else {
                DomainError::Payment(PaymentError::ProcessingFailed {
                    message: err.to_string(),
                })
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = http::response_error_message(response).await;
            return Err(PaymentError::Gateway {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(response)
    }

    async fn parse<R: serde::de::DeserializeOwned>(response: reqwest::Response) -> DomainResult<R> {
        response.json().await.map_err(|err| {
            PaymentError::InvalidResponse {
                message: err.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl<T: AuthTokenSource> PaymentGatewayClient for AntomGatewayClient<T> {
    async fn create_payment(&self, request: &CreatePaymentRequest) -> DomainResult<CreatedPayment> {
        let token = self.bearer().await?;
        let body = CreatePaymentBody {
            merchant_id: &self.config.merchant_id,
            amount: request.amount,
            currency: &request.currency,
            payment_method_type: request.method.as_wire(),
            metadata: PaymentMetadata::from(&request.purchase),
            merchant_reference: &request.merchant_reference,
        };

        let response = self
            .send(
                self.http
                    .post(self.url("/payment/create"))
                    .bearer_auth(&token)
                    .json(&body),
            )
            .await?;
        let parsed: CreatePaymentResponse = Self::parse(response).await?;
        debug!(
            payment_request_id = parsed.payment_request_id.as_deref().unwrap_or("<none>"),
            "payment request created"
        );
        Ok(CreatedPayment {
            payment_request_id: parsed.payment_request_id,
        })
    }

    async fn process_card_payment(
        &self,
        payment_request_id: &str,
        card: &CardDetails,
    ) -> DomainResult<()> {
        let token = self.bearer().await?;
        let body = ProcessCardBody {
            payment_request_id,
            card: CardWire {
                number: card.wire_number(),
                expiry: card.wire_expiry(),
                cvc: card.cvc(),
                holder_name: card.holder_name(),
            },
        };

        self.send(
            self.http
                .post(self.url("/payment/process/card"))
                .bearer_auth(&token)
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn process_wallet_payment(
        &self,
        payment_request_id: &str,
        wallet_type: &str,
    ) -> DomainResult<WalletRedirect> {
        let token = self.bearer().await?;
        let body = ProcessWalletBody {
            payment_request_id,
            wallet_type,
        };

        let response = self
            .send(
                self.http
                    .post(self.url("/payment/process/wallet"))
                    .bearer_auth(&token)
                    .json(&body),
            )
            .await?;
        let parsed: ProcessWalletResponse = Self::parse(response).await?;
        let redirect_url = parsed
            .redirect_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| PaymentError::InvalidResponse {
                message: String::from("wallet processing returned no redirect URL"),
            })?;
        Ok(WalletRedirect { redirect_url })
    }

    async fn payment_status(
        &self,
        payment_request_id: &str,
    ) -> DomainResult<PaymentStatusSnapshot> {
        let token = self.bearer().await?;
        let response = self
            .send(
                self.http
                    .get(self.url(&format!("/payment/status/{payment_request_id}")))
                    .bearer_auth(&token),
            )
            .await?;
        let parsed: PaymentStatusResponse = Self::parse(response).await?;
        Ok(PaymentStatusSnapshot {
            id: parsed.id.unwrap_or_else(|| payment_request_id.to_string()),
            status: PaymentStatus::from_raw(&parsed.status),
            result_code: parsed.result_code,
        })
    }

    async fn cancel_payment(&self, payment_request_id: &str) -> DomainResult<()> {
        let token = self.bearer().await?;
        self.send(
            self.http
                .post(self.url(&format!("/payment/cancel/{payment_request_id}")))
                .bearer_auth(&token),
        )
        .await?;
        Ok(())
    }

    async fn payment_history(
        &self,
        page: PageRequest,
        status: Option<&str>,
    ) -> DomainResult<Vec<PaymentRequest>> {
        let token = self.bearer().await?;
        let mut request = self
            .http
            .get(self.url("/payment/history"))
            .bearer_auth(&token)
            .query(&[("page", page.page), ("limit", page.items_per_page)]);
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }

        let response = self.send(request).await?;
        let parsed: HistoryResponse = Self::parse(response).await?;
        Ok(parsed.payments.into_iter().map(PaymentRequest::from).collect())
    }
}
