//! Backend REST API client interface (purchase confirmation + video service).

use async_trait::async_trait;

use crate::domain::entities::{TemplateVideo, VideoTask};
use crate::errors::DomainResult;
use vd_shared::types::PageRequest;

/// Wire parameters for `POST /api/video/createVideo`.
///
/// Exactly one of the three generation shapes is populated by the video
/// service: prompt only, image + template, or image + prompt.
#[derive(Debug, Clone, Default)]
pub struct CreateVideoRequest {
    /// Owning user id
    pub uid: String,
    /// Prompt text; empty in template mode
    pub prompt_text: Option<String>,
    /// Inline image payload from the picker
    pub image: Option<String>,
    /// Previously uploaded image URL
    pub image_url: Option<String>,
    /// Template id driving template-mode generation
    pub template: Option<String>,
    /// Negative prompt forwarded verbatim when set
    pub negative_prompt: Option<String>,
    /// Requested output size, e.g. "720p"
    pub size: Option<String>,
}

/// Operations against the app backend.
///
/// Implementations attach a bearer token to every call. The confirm
/// endpoints are idempotent on `payment_request_id`, which is what makes
/// re-running a failed confirmation safe.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// `POST /subscription/confirm`
    async fn confirm_subscription(
        &self,
        user_id: &str,
        plan_id: &str,
        amount: f64,
        payment_request_id: &str,
    ) -> DomainResult<()>;

    /// `POST /addon/confirm`
    async fn confirm_addon(
        &self,
        user_id: &str,
        addon_id: &str,
        amount: f64,
        payment_request_id: &str,
    ) -> DomainResult<()>;

    /// `POST /api/video/createVideo`
    async fn create_video(&self, request: &CreateVideoRequest) -> DomainResult<VideoTask>;

    /// `POST /api/video/getVideoStatus`
    async fn video_status(&self, uid: &str, video_id: &str) -> DomainResult<VideoTask>;

    /// `POST /api/video/getVideoHistory`
    async fn video_history(&self, uid: &str, page: PageRequest) -> DomainResult<Vec<VideoTask>>;

    /// `POST /api/video/removeVideo`
    async fn remove_video(&self, uid: &str, video_id: &str) -> DomainResult<()>;

    /// `GET /api/video/templates`
    async fn list_templates(&self) -> DomainResult<Vec<TemplateVideo>>;
}
