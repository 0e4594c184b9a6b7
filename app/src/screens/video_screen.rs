//! Video composer screen view-model and history panel.

use std::sync::Arc;

use tracing::debug;

use crate::dto::VideoDisplayItem;
use vd_core::clients::BackendClient;
use vd_core::domain::entities::VideoTask;
use vd_core::errors::DomainResult;
use vd_core::services::video::{AttachedImage, GenerationInput, GenerationPlan, VideoService};

/// Where the composer goes when the user taps "generate"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    /// Proceed to the generation step with a priced plan
    Navigate(GenerationPlan),
    /// Not enough coins; open the recharge prompt instead
    PromptRecharge { required: u32, balance: u32 },
    /// Local validation failed; message is in the error banner
    Invalid { message: String },
}

/// Composer screen state: prompt, attached image, selected template,
/// balance, and the generation guard flag.
pub struct VideoComposerScreen<B: BackendClient> {
    service: Arc<VideoService<B>>,
    uid: String,
    prompt: String,
    image: Option<AttachedImage>,
    template_id: Option<String>,
    negative_prompt: Option<String>,
    size: Option<String>,
    coin_balance: u32,
    generating: bool,
    error: Option<String>,
}

impl<B: BackendClient> VideoComposerScreen<B> {
    pub fn new(service: Arc<VideoService<B>>, uid: impl Into<String>, coin_balance: u32) -> Self {
        Self {
            service,
            uid: uid.into(),
            prompt: String::new(),
            image: None,
            template_id: None,
            negative_prompt: None,
            size: None,
            coin_balance,
            generating: false,
            error: None,
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn attach_image(&mut self, image: AttachedImage) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn select_template(&mut self, template_id: impl Into<String>) {
        self.template_id = Some(template_id.into());
    }

    pub fn clear_template(&mut self) {
        self.template_id = None;
    }

    pub fn set_negative_prompt(&mut self, negative_prompt: Option<String>) {
        self.negative_prompt = negative_prompt;
    }

    pub fn set_size(&mut self, size: Option<String>) {
        self.size = size;
    }

    /// Balance comes from the profile; the host updates it on focus
    pub fn set_coin_balance(&mut self, coin_balance: u32) {
        self.coin_balance = coin_balance;
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Resolve the composer state and gate on the coin balance.
    ///
    /// Insufficient balance opens the recharge prompt instead of
    /// navigating.
    pub fn proceed(&mut self) -> ComposerAction {
        self.error = None;

        let plan = match VideoService::<B>::plan_generation(&self.input()) {
            Ok(plan) => plan,
            Err(err) => {
                let message = err.to_string();
                self.error = Some(message.clone());
                return ComposerAction::Invalid { message };
            }
        };

        if let Err(err) = VideoService::<B>::ensure_affordable(&plan, self.coin_balance) {
            debug!(
                required = plan.coin_cost,
                balance = self.coin_balance,
                "insufficient coins, prompting recharge"
            );
            self.error = Some(err.to_string());
            return ComposerAction::PromptRecharge {
                required: plan.coin_cost,
                balance: self.coin_balance,
            };
        }

        ComposerAction::Navigate(plan)
    }

    /// Submit a planned generation. Returns `Ok(None)` when a generation
    /// is already in flight (the button is disabled anyway).
    pub async fn generate(&mut self, plan: &GenerationPlan) -> DomainResult<Option<VideoTask>> {
        if self.generating {
            return Ok(None);
        }
        self.generating = true;
        self.error = None;

        let result = self.service.submit_generation(&self.uid, plan).await;
        self.generating = false;

        match result {
            Ok(task) => Ok(Some(task)),
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn input(&self) -> GenerationInput {
        GenerationInput {
            prompt: self.prompt.clone(),
            image: self.image.clone(),
            template_id: self.template_id.clone(),
            negative_prompt: self.negative_prompt.clone(),
            size: self.size.clone(),
        }
    }
}

/// Paginated history list with the load-more guard.
///
/// `load_more` refuses while a fetch is in flight or once a short page
/// signalled the end of the listing.
pub struct HistoryPanel {
    items: Vec<VideoDisplayItem>,
    next_page: u32,
    loading: bool,
    has_more: bool,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            loading: false,
            has_more: true,
        }
    }

    pub fn items(&self) -> &[VideoDisplayItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the load-more control is enabled
    pub fn can_load_more(&self) -> bool {
        !self.loading && self.has_more
    }

    /// Fetch the next page and append it. Returns the number of rows
    /// added; zero when the call was refused or the listing is exhausted.
    pub async fn load_more<B: BackendClient>(
        &mut self,
        service: &VideoService<B>,
        uid: &str,
    ) -> DomainResult<usize> {
        if !self.can_load_more() {
            return Ok(0);
        }
        self.loading = true;

        let result = service.history_page(uid, self.next_page).await;
        self.loading = false;

        let page = result?;
        self.has_more = page.has_more;
        self.next_page += 1;

        let added = page.items.len();
        self.items
            .extend(page.items.iter().map(VideoDisplayItem::from));
        debug!(added, has_more = self.has_more, "history panel extended");
        Ok(added)
    }

    /// Drop local state and start over from the first page
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_page = 1;
        self.loading = false;
        self.has_more = true;
    }

    /// Delete one task and drop its row
    pub async fn remove<B: BackendClient>(
        &mut self,
        service: &VideoService<B>,
        uid: &str,
        video_id: &str,
    ) -> DomainResult<()> {
        service.remove_video(uid, video_id).await?;
        self.items.retain(|item| item.video_id != video_id);
        Ok(())
    }
}

impl Default for HistoryPanel {
    fn default() -> Self {
        Self::new()
    }
}
