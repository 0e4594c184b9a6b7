//! App backend REST client: purchase confirmation and the video service.
//!
//! `RemoteVideoItem` is the single normalization boundary for the
//! backend's mixed field conventions; nothing outside this file deals with
//! raw wire shapes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::{http, InfrastructureError};
use vd_core::clients::{AuthTokenSource, BackendClient, CreateVideoRequest};
use vd_core::domain::entities::{TemplateCategory, TemplateVideo, VideoStatus, VideoTask};
use vd_core::errors::{DomainError, DomainResult, VideoError};
use vd_shared::config::VideoServiceConfig;
use vd_shared::types::PageRequest;

#[derive(Serialize)]
struct ConfirmSubscriptionBody<'a> {
    user_id: &'a str,
    plan_id: &'a str,
    amount: f64,
    payment_request_id: &'a str,
}

#[derive(Serialize)]
struct ConfirmAddonBody<'a> {
    user_id: &'a str,
    addon_id: &'a str,
    amount: f64,
    payment_request_id: &'a str,
}

#[derive(Serialize)]
struct CreateVideoBody<'a> {
    uid: &'a str,
    #[serde(rename = "promptText", skip_serializing_if = "Option::is_none")]
    prompt_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
}

#[derive(Serialize)]
struct VideoIdBody<'a> {
    uid: &'a str,
    #[serde(rename = "videoId")]
    video_id: &'a str,
}

#[derive(Serialize)]
struct HistoryBody<'a> {
    uid: &'a str,
    page: u32,
    #[serde(rename = "itemsPerPage")]
    items_per_page: u32,
}

/// One video task as the backend reports it, in whichever field-naming
/// convention the endpoint happens to use.
#[derive(Debug, Deserialize)]
struct RemoteVideoItem {
    #[serde(alias = "videoId")]
    video_id: String,
    #[serde(default, alias = "promptText")]
    prompt_text: String,
    #[serde(default)]
    status: String,
    #[serde(default, alias = "videoUrl")]
    video_url: Option<String>,
    #[serde(default, alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,
}

impl From<RemoteVideoItem> for VideoTask {
    fn from(item: RemoteVideoItem) -> Self {
        // A create response may omit the status; a brand-new task is processing
        let status = if item.status.is_empty() {
            VideoStatus::Processing
        } else {
            VideoStatus::from_raw(&item.status)
        };
        VideoTask {
            video_id: item.video_id,
            prompt_text: item.prompt_text,
            status,
            video_url: item.video_url.filter(|url| !url.is_empty()),
            created_at: item.created_at,
        }
    }
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    #[serde(alias = "items", alias = "history")]
    videos: Vec<RemoteVideoItem>,
}

#[derive(Debug, Deserialize)]
struct RemoteTemplate {
    id: String,
    name: String,
    #[serde(alias = "videoUrl")]
    video_url: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
}

impl From<RemoteTemplate> for TemplateVideo {
    fn from(item: RemoteTemplate) -> Self {
        let category = if item.category.eq_ignore_ascii_case("premium") {
            TemplateCategory::Premium
        } else {
            TemplateCategory::Basic
        };
        TemplateVideo {
            id: item.id,
            name: item.name,
            video_url: item.video_url,
            category,
            description: item.description,
        }
    }
}

#[derive(Deserialize)]
struct TemplatesEnvelope {
    templates: Vec<RemoteTemplate>,
}

/// reqwest-backed backend client; every call carries a bearer token from
/// the injected token source.
pub struct HttpBackendClient<T: AuthTokenSource> {
    config: VideoServiceConfig,
    tokens: Arc<T>,
    http: reqwest::Client,
}

impl<T: AuthTokenSource> HttpBackendClient<T> {
    pub fn new(config: VideoServiceConfig, tokens: Arc<T>) -> Result<Self, InfrastructureError> {
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

    /// Send a backend request and map failures into the video taxonomy
    async fn send(&self, request: reqwest::RequestBuilder) -> DomainResult<reqwest::Response> {
        let response = request.send().await.map_err(|err| {
            if http::is_network_error(&err) {
                DomainError::Video(VideoError::Network {
                    message: err.to_string(),
                })
            } else {
                DomainError::Video(VideoError::InvalidResponse {
                    message: err.to_string(),
                })
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = http::response_error_message(response).await;
            return Err(VideoError::Backend {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(response)
    }

    async fn parse<R: serde::de::DeserializeOwned>(response: reqwest::Response) -> DomainResult<R> {
        response.json().await.map_err(|err| {
            VideoError::InvalidResponse {
                message: err.to_string(),
            }
            .into()
        })
    }

    /// Confirm endpoints share the failure shape; the payment service wraps
    /// whatever comes back into its reconcile error.
    async fn confirm(&self, path: &str, body: impl Serialize) -> DomainResult<()> {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|err| DomainError::Internal {
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = http::response_error_message(response).await;
            return Err(DomainError::Internal {
                message: format!("confirmation endpoint returned {}: {message}", status.as_u16()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<T: AuthTokenSource> BackendClient for HttpBackendClient<T> {
    async fn confirm_subscription(
        &self,
        user_id: &str,
        plan_id: &str,
        amount: f64,
        payment_request_id: &str,
    ) -> DomainResult<()> {
        debug!(payment_request_id, plan_id, "confirming subscription purchase");
        self.confirm(
            "/subscription/confirm",
            ConfirmSubscriptionBody {
                user_id,
                plan_id,
                amount,
                payment_request_id,
            },
        )
        .await
    }

    async fn confirm_addon(
        &self,
        user_id: &str,
        addon_id: &str,
        amount: f64,
        payment_request_id: &str,
    ) -> DomainResult<()> {
        debug!(payment_request_id, addon_id, "confirming addon purchase");
        self.confirm(
            "/addon/confirm",
            ConfirmAddonBody {
                user_id,
                addon_id,
                amount,
                payment_request_id,
            },
        )
        .await
    }

    async fn create_video(&self, request: &CreateVideoRequest) -> DomainResult<VideoTask> {
        let token = self.bearer().await?;
        let body = CreateVideoBody {
            uid: &request.uid,
            prompt_text: request.prompt_text.as_deref(),
            image: request.image.as_deref(),
            image_url: request.image_url.as_deref(),
            template: request.template.as_deref(),
            negative_prompt: request.negative_prompt.as_deref(),
            size: request.size.as_deref(),
        };

        let response = self
            .send(
                self.http
                    .post(self.url("/api/video/createVideo"))
                    .bearer_auth(&token)
                    .json(&body),
            )
            .await?;
        let item: RemoteVideoItem = Self::parse(response).await?;
        Ok(item.into())
    }

    async fn video_status(&self, uid: &str, video_id: &str) -> DomainResult<VideoTask> {
        let token = self.bearer().await?;
        let response = self
            .send(
                self.http
                    .post(self.url("/api/video/getVideoStatus"))
                    .bearer_auth(&token)
                    .json(&VideoIdBody { uid, video_id }),
            )
            .await?;
        let item: RemoteVideoItem = Self::parse(response).await?;
        Ok(item.into())
    }

    async fn video_history(&self, uid: &str, page: PageRequest) -> DomainResult<Vec<VideoTask>> {
        let token = self.bearer().await?;
        let response = self
            .send(
                self.http
                    .post(self.url("/api/video/getVideoHistory"))
                    .bearer_auth(&token)
                    .json(&HistoryBody {
                        uid,
                        page: page.page,
                        items_per_page: page.items_per_page,
                    }),
            )
            .await?;
        let envelope: HistoryEnvelope = Self::parse(response).await?;
        Ok(envelope.videos.into_iter().map(VideoTask::from).collect())
    }

    async fn remove_video(&self, uid: &str, video_id: &str) -> DomainResult<()> {
        let token = self.bearer().await?;
        self.send(
            self.http
                .post(self.url("/api/video/removeVideo"))
                .bearer_auth(&token)
                .json(&VideoIdBody { uid, video_id }),
        )
        .await?;
        Ok(())
    }

    async fn list_templates(&self) -> DomainResult<Vec<TemplateVideo>> {
        let token = self.bearer().await?;
        let response = self
            .send(
                self.http
                    .get(self.url("/api/video/templates"))
                    .bearer_auth(&token),
            )
            .await?;
        let envelope: TemplatesEnvelope = Self::parse(response).await?;
        Ok(envelope.templates.into_iter().map(TemplateVideo::from).collect())
    }
}
