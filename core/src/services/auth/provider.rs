//! Lazy gateway-authentication state machine.
//!
//! One provider instance is created per payment screen tree. The first
//! `initialize` call claims the attempt and drives it to completion,
//! including the bounded retries; concurrent callers observe that attempt
//! rather than starting their own, so two authentication attempts can never
//! overlap.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::config::SessionRetryConfig;
use crate::clients::AuthTokenSource;
use crate::errors::{AuthError, DomainError, DomainResult};

/// Session lifecycle state exposed to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Not initialized and nothing in flight
    Idle,
    /// An attempt (possibly mid-retry) is in flight
    Initializing,
    /// A token was obtained; payment calls may proceed
    Ready,
    /// Retries exhausted; holds the final error message
    Failed { message: String },
}

impl SessionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    /// The error message shown by the UI when initialization failed
    pub fn last_error(&self) -> Option<&str> {
        match self {
            SessionState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Payment session provider: ensures the gateway is authenticated before
/// the payment screens call it.
pub struct PaymentSessionProvider<S: AuthTokenSource> {
    token_source: Arc<S>,
    config: SessionRetryConfig,
    state: Mutex<SessionState>,
}

impl<S: AuthTokenSource> PaymentSessionProvider<S> {
    pub fn new(token_source: Arc<S>, config: SessionRetryConfig) -> Self {
        Self {
            token_source,
            config,
            state: Mutex::new(SessionState::Idle),
        }
    }

    /// Snapshot of the current state for the UI
    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.state.lock().await.is_ready()
    }

    /// Ensure the session is initialized.
    ///
    /// Idempotent: `Ready` returns immediately. A caller that finds another
    /// attempt in flight waits briefly, re-checks, and reports
    /// [`AuthError::StillInitializing`] if the attempt has not finished;
    /// it never starts a second attempt. From `Idle` or `Failed` the caller
    /// claims the attempt and runs it to completion, awaiting every retry.
    pub async fn initialize(&self) -> DomainResult<()> {
        let claimed = {
            let mut state = self.state.lock().await;
            match &*state {
                SessionState::Ready => {
                    debug!("payment session already initialized");
                    return Ok(());
                }
                SessionState::Initializing => false,
                SessionState::Idle | SessionState::Failed { .. } => {
                    *state = SessionState::Initializing;
                    true
                }
            }
        };

        if claimed {
            self.run_attempts().await
        } else {
            self.observe_in_flight().await
        }
    }

    /// Re-entrant path: wait once, re-check, never retry
    async fn observe_in_flight(&self) -> DomainResult<()> {
        debug!("initialization already in flight, waiting before re-check");
        sleep(self.config.reentry_wait).await;

        if self.state.lock().await.is_ready() {
            Ok(())
        } else {
            Err(AuthError::StillInitializing.into())
        }
    }

    /// Coordinator path: owns the attempt loop, including retries
    async fn run_attempts(&self) -> DomainResult<()> {
        let max_attempts = self.config.max_attempts();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(attempt, max_attempts, "authenticating payment session");

            match self.token_source.authenticate().await {
                Ok(token) => {
                    *self.state.lock().await = SessionState::Ready;
                    info!(
                        attempt,
                        expires_at = %token.expires_at,
                        "payment session initialized"
                    );
                    return Ok(());
                }
                Err(err) => {
                    let retryable = match &err {
                        DomainError::Auth(auth) => auth.is_retryable(),
                        _ => true,
                    };

                    if retryable && attempt < max_attempts {
                        warn!(
                            attempt,
                            max_attempts,
                            error = %err,
                            "payment session authentication failed, retrying"
                        );
                        sleep(self.config.retry_delay).await;
                        continue;
                    }

                    let message = err.to_string();
                    *self.state.lock().await = SessionState::Failed {
                        message: message.clone(),
                    };
                    error!(
                        attempt,
                        error = %message,
                        "payment session initialization failed"
                    );
                    return Err(AuthError::InitializationFailed {
                        attempts: attempt,
                        last: message,
                    }
                    .into());
                }
            }
        }
    }
}
