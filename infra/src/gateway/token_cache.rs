//! Bearer token cache for the payment gateway.
//!
//! A valid cached token is returned without a network call; otherwise the
//! token endpoint is called with the client credentials and the result is
//! cached until shortly before its server-side expiry. The cache has an
//! explicit lifecycle: constructed at app start, injected into the API
//! clients, invalidated on logout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{http, InfrastructureError};
use vd_core::clients::AuthTokenSource;
use vd_core::domain::entities::AuthToken;
use vd_core::errors::{AuthError, DomainResult};
use vd_shared::config::GatewayConfig;

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    private_key: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Process-lifetime cache of the gateway bearer token
pub struct TokenCache {
    config: GatewayConfig,
    http: reqwest::Client,
    cached: RwLock<Option<AuthToken>>,
}

impl TokenCache {
    pub fn new(config: GatewayConfig) -> Result<Self, InfrastructureError> {
        let http = http::build_client(config.request_timeout_secs)?;
        Ok(Self {
            config,
            http,
            cached: RwLock::new(None),
        })
    }

    /// One token request, with the failure classification the rest of the
    /// app relies on. No retry here; callers own retry policy.
    async fn request_token(&self) -> DomainResult<AuthToken> {
        let url = format!("{}/auth/token", self.config.base_url);
        let result = self
            .http
            .post(&url)
            .json(&TokenRequest {
                client_id: &self.config.client_id,
                private_key: &self.config.private_key,
            })
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err) if http::is_network_error(&err) => {
                return Err(AuthError::Network {
                    message: err.to_string(),
                }
                .into());
            }
            Err(err) => {
                return Err(AuthError::Request {
                    message: err.to_string(),
                }
                .into());
            }
        };

        let status = response.status();
        match status.as_u16() {
            401 => return Err(AuthError::InvalidCredentials.into()),
            403 => return Err(AuthError::Forbidden.into()),
            code if !status.is_success() => {
                let message = http::response_error_message(response).await;
                return Err(AuthError::GatewayStatus {
                    status: code,
                    message,
                }
                .into());
            }
            _ => {}
        }

        let body: TokenResponse = response.json().await.map_err(|err| AuthError::Request {
            message: format!("malformed token response: {err}"),
        })?;
        if body.token.is_empty() {
            return Err(AuthError::Request {
                message: String::from("token response carried an empty token"),
            }
            .into());
        }

        Ok(AuthToken::with_lifetime_hours(
            body.token,
            self.config.token_lifetime_hours,
        ))
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, token: AuthToken) {
        *self.cached.write().await = Some(token);
    }
}

#[async_trait]
impl AuthTokenSource for TokenCache {
    async fn authenticate(&self) -> DomainResult<AuthToken> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_valid() {
                debug!("gateway token cache hit");
                return Ok(token.clone());
            }
        }

        // Writers serialize here; re-check so a token is fetched at most
        // once per expiry even under concurrent callers.
        let mut slot = self.cached.write().await;
        if let Some(token) = slot.as_ref() {
            if token.is_valid() {
                return Ok(token.clone());
            }
        }

        let token = self.request_token().await?;
        info!(expires_at = %token.expires_at, "gateway token refreshed");
        *slot = Some(token.clone());
        Ok(token)
    }

    async fn invalidate(&self) {
        *self.cached.write().await = None;
        debug!("gateway token invalidated");
    }
}
