//! Template listing cache.
//!
//! The template catalogue changes rarely; one fetch is reused for a
//! freshness window (24 hours by default) and invalidated by age or
//! explicitly.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use vd_core::clients::BackendClient;
use vd_core::domain::entities::TemplateVideo;
use vd_core::errors::DomainResult;
use vd_shared::config::VideoServiceConfig;

struct CachedTemplates {
    fetched_at: DateTime<Utc>,
    templates: Vec<TemplateVideo>,
}

/// Freshness-windowed cache over the backend template listing
pub struct TemplateCache<B: BackendClient> {
    backend: Arc<B>,
    ttl: Duration,
    inner: RwLock<Option<CachedTemplates>>,
}

impl<B: BackendClient> TemplateCache<B> {
    pub fn new(backend: Arc<B>, config: &VideoServiceConfig) -> Self {
        Self {
            backend,
            ttl: Duration::hours(config.template_ttl_hours),
            inner: RwLock::new(None),
        }
    }

    /// Return the cached listing, refetching when stale or absent
    pub async fn templates(&self) -> DomainResult<Vec<TemplateVideo>> {
        if let Some(cached) = self.inner.read().await.as_ref() {
            if self.is_fresh(cached) {
                debug!(count = cached.templates.len(), "template cache hit");
                return Ok(cached.templates.clone());
            }
        }

        let mut slot = self.inner.write().await;
        if let Some(cached) = slot.as_ref() {
            if self.is_fresh(cached) {
                return Ok(cached.templates.clone());
            }
        }

        let templates = self.backend.list_templates().await?;
        info!(count = templates.len(), "template listing refreshed");
        *slot = Some(CachedTemplates {
            fetched_at: Utc::now(),
            templates: templates.clone(),
        });
        Ok(templates)
    }

    /// Drop the cached listing
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
        debug!("template cache invalidated");
    }

    fn is_fresh(&self, cached: &CachedTemplates) -> bool {
        Utc::now() - cached.fetched_at < self.ttl
    }

    #[cfg(test)]
    async fn age_cache(&self, by: Duration) {
        if let Some(cached) = self.inner.write().await.as_mut() {
            cached.fetched_at = cached.fetched_at - by;
        }
    }
}
