//! Video generation service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::clients::{BackendClient, CreateVideoRequest};
use crate::domain::entities::template::{template_cost, STANDARD_GENERATION_COST};
use crate::domain::entities::VideoTask;
use crate::errors::{DomainResult, ValidationError, VideoError};
use vd_shared::config::VideoServiceConfig;
use vd_shared::types::PageRequest;

/// Image attached on the composer screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachedImage {
    /// Inline payload straight from the picker
    Inline(String),
    /// Previously uploaded image
    Remote(String),
}

/// Raw composer state when the user taps "generate"
#[derive(Debug, Clone, Default)]
pub struct GenerationInput {
    pub prompt: String,
    pub image: Option<AttachedImage>,
    /// Template the user explicitly selected
    pub template_id: Option<String>,
    pub negative_prompt: Option<String>,
    /// Requested output size, e.g. "720p"
    pub size: Option<String>,
}

/// The three mutually exclusive generation modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    /// No image attached: plain text-to-video
    TextOnly { prompt: String },
    /// Image plus an explicitly selected template; prompt text is dropped
    Template {
        image: AttachedImage,
        template_id: String,
    },
    /// Image plus prompt, no template
    ImagePrompt {
        image: AttachedImage,
        prompt: String,
    },
}

/// A priced, ready-to-submit generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub mode: GenerationMode,
    pub coin_cost: u32,
    pub negative_prompt: Option<String>,
    pub size: Option<String>,
}

/// One page of normalized video history
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub page: u32,
    pub items: Vec<VideoTask>,
    /// Short-page heuristic: false once a page comes back under-filled
    pub has_more: bool,
}

/// Video generation service
pub struct VideoService<B: BackendClient> {
    backend: Arc<B>,
    config: VideoServiceConfig,
}

impl<B: BackendClient> VideoService<B> {
    pub fn new(backend: Arc<B>, config: VideoServiceConfig) -> Self {
        Self { backend, config }
    }

    /// Resolve the composer state into a priced generation plan.
    ///
    /// Mode precedence: no image wins (text-only, even when a template is
    /// still selected from an earlier interaction), then image + template,
    /// then image + prompt. Template generations priced per the fixed
    /// premium set; everything else costs the standard rate.
    pub fn plan_generation(input: &GenerationInput) -> Result<GenerationPlan, ValidationError> {
        let mode = match (&input.image, &input.template_id) {
            (None, _) => {
                let prompt = input.prompt.trim();
                if prompt.is_empty() {
                    return Err(ValidationError::EmptyPrompt);
                }
                GenerationMode::TextOnly {
                    prompt: prompt.to_string(),
                }
            }
            (Some(image), Some(template_id)) => GenerationMode::Template {
                image: image.clone(),
                template_id: template_id.clone(),
            },
            (Some(image), None) => GenerationMode::ImagePrompt {
                image: image.clone(),
                prompt: input.prompt.trim().to_string(),
            },
        };

        let coin_cost = match &mode {
            GenerationMode::Template { template_id, .. } => template_cost(template_id),
            _ => STANDARD_GENERATION_COST,
        };

        Ok(GenerationPlan {
            mode,
            coin_cost,
            negative_prompt: input.negative_prompt.clone(),
            size: input.size.clone(),
        })
    }

    /// Check the plan against the user's coin balance
    pub fn ensure_affordable(plan: &GenerationPlan, balance: u32) -> Result<(), VideoError> {
        if balance < plan.coin_cost {
            return Err(VideoError::InsufficientCoins {
                required: plan.coin_cost,
                balance,
            });
        }
        Ok(())
    }

    /// Submit a planned generation to the backend
    pub async fn submit_generation(
        &self,
        uid: &str,
        plan: &GenerationPlan,
    ) -> DomainResult<VideoTask> {
        let request = Self::build_request(uid, plan);
        info!(uid, cost = plan.coin_cost, "submitting video generation");
        let task = self.backend.create_video(&request).await?;
        debug!(video_id = %task.video_id, "generation task created");
        Ok(task)
    }

    /// One task's current status
    pub async fn video_status(&self, uid: &str, video_id: &str) -> DomainResult<VideoTask> {
        self.backend.video_status(uid, video_id).await
    }

    /// Fetch one history page and apply the short-page heuristic
    pub async fn history_page(&self, uid: &str, page: u32) -> DomainResult<HistoryPage> {
        let request = PageRequest::new(page, self.config.history_page_size);
        let items = self.backend.video_history(uid, request).await?;
        let has_more = request.indicates_more(items.len());
        debug!(uid, page, count = items.len(), has_more, "history page fetched");
        Ok(HistoryPage {
            page: request.page,
            items,
            has_more,
        })
    }

    /// Delete one task
    pub async fn remove_video(&self, uid: &str, video_id: &str) -> DomainResult<()> {
        info!(uid, video_id, "removing video");
        self.backend.remove_video(uid, video_id).await
    }

    /// Map a plan onto the backend's create-video wire shape
    fn build_request(uid: &str, plan: &GenerationPlan) -> CreateVideoRequest {
        let mut request = CreateVideoRequest {
            uid: uid.to_string(),
            negative_prompt: plan.negative_prompt.clone(),
            size: plan.size.clone(),
            ..Default::default()
        };

        match &plan.mode {
            GenerationMode::TextOnly { prompt } => {
                request.prompt_text = Some(prompt.clone());
            }
            GenerationMode::Template { image, template_id } => {
                Self::attach_image(&mut request, image);
                request.template = Some(template_id.clone());
            }
            GenerationMode::ImagePrompt { image, prompt } => {
                Self::attach_image(&mut request, image);
                if !prompt.is_empty() {
                    request.prompt_text = Some(prompt.clone());
                }
            }
        }

        request
    }

    fn attach_image(request: &mut CreateVideoRequest, image: &AttachedImage) {
        match image {
            AttachedImage::Inline(data) => request.image = Some(data.clone()),
            AttachedImage::Remote(url) => request.image_url = Some(url.clone()),
        }
    }
}
