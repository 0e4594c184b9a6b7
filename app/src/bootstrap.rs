//! Application assembly.
//!
//! Builds the full service stack in dependency order: configuration, the
//! token cache, the two HTTP clients, then the domain services. The host
//! shell calls this once at startup and hands the pieces to the screens.

use std::sync::Arc;

use anyhow::Context;

use vd_core::services::auth::{PaymentSessionProvider, SessionRetryConfig};
use vd_core::services::payment::{PaymentService, PaymentServiceConfig};
use vd_core::services::video::VideoService;
use vd_infra::{AntomGatewayClient, HttpBackendClient, TemplateCache, TokenCache};
use vd_shared::config::AppConfig;

type Gateway = AntomGatewayClient<TokenCache>;
type Backend = HttpBackendClient<TokenCache>;

/// The assembled service stack
pub struct AppServices {
    pub config: AppConfig,
    pub token_cache: Arc<TokenCache>,
    pub session: Arc<PaymentSessionProvider<TokenCache>>,
    pub payments: Arc<PaymentService<Gateway, Backend>>,
    pub videos: Arc<VideoService<Backend>>,
    pub templates: Arc<TemplateCache<Backend>>,
}

/// Load configuration and wire the whole stack together
pub fn bootstrap() -> anyhow::Result<AppServices> {
    let config = vd_infra::app_config::load().context("loading configuration")?;
    crate::telemetry::init_tracing(&config.logging);

    let token_cache =
        Arc::new(TokenCache::new(config.gateway.clone()).context("building token cache")?);

    let gateway = Arc::new(
        AntomGatewayClient::new(config.gateway.clone(), token_cache.clone())
            .context("building gateway client")?,
    );
    let backend = Arc::new(
        HttpBackendClient::new(config.video.clone(), token_cache.clone())
            .context("building backend client")?,
    );

    let session = Arc::new(PaymentSessionProvider::new(
        token_cache.clone(),
        SessionRetryConfig::default(),
    ));
    let payments = Arc::new(PaymentService::new(
        gateway,
        backend.clone(),
        PaymentServiceConfig::new(config.gateway.currency.clone()),
    ));
    let videos = Arc::new(VideoService::new(backend.clone(), config.video.clone()));
    let templates = Arc::new(TemplateCache::new(backend, &config.video));

    tracing::info!(environment = %config.environment, "application services assembled");

    Ok(AppServices {
        config,
        token_cache,
        session,
        payments,
        videos,
        templates,
    })
}
