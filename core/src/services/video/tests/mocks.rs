//! Recording backend mock for video service tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::clients::{BackendClient, CreateVideoRequest};
use crate::domain::entities::{TemplateVideo, VideoStatus, VideoTask};
use crate::errors::DomainResult;
use vd_shared::types::PageRequest;

/// Build a processing task for test fixtures
pub fn processing_task(video_id: &str) -> VideoTask {
    VideoTask {
        video_id: video_id.to_string(),
        prompt_text: String::from("a fox in the snow"),
        status: VideoStatus::Processing,
        video_url: None,
        created_at: None,
    }
}

/// Recording video backend; history returns a fixed number of items
pub struct MockVideoBackend {
    /// Items returned per history call (capped at the requested page size)
    pub history_items: usize,
    pub create_calls: Mutex<Vec<CreateVideoRequest>>,
    pub history_calls: Mutex<Vec<PageRequest>>,
    pub removed: Mutex<Vec<String>>,
}

impl MockVideoBackend {
    pub fn new() -> Self {
        Self {
            history_items: 0,
            create_calls: Mutex::new(Vec::new()),
            history_calls: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_history_items(history_items: usize) -> Self {
        Self {
            history_items,
            ..Self::new()
        }
    }

    pub fn last_create_call(&self) -> CreateVideoRequest {
        self.create_calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("create_video was not called")
    }
}

#[async_trait]
impl BackendClient for MockVideoBackend {
    async fn confirm_subscription(
        &self,
        _user_id: &str,
        _plan_id: &str,
        _amount: f64,
        _payment_request_id: &str,
    ) -> DomainResult<()> {
        unimplemented!("not exercised by video tests")
    }

    async fn confirm_addon(
        &self,
        _user_id: &str,
        _addon_id: &str,
        _amount: f64,
        _payment_request_id: &str,
    ) -> DomainResult<()> {
        unimplemented!("not exercised by video tests")
    }

    async fn create_video(&self, request: &CreateVideoRequest) -> DomainResult<VideoTask> {
        self.create_calls.lock().unwrap().push(request.clone());
        Ok(processing_task("vid_new"))
    }

    async fn video_status(&self, _uid: &str, video_id: &str) -> DomainResult<VideoTask> {
        Ok(processing_task(video_id))
    }

    async fn video_history(
        &self,
        _uid: &str,
        page: PageRequest,
    ) -> DomainResult<Vec<VideoTask>> {
        self.history_calls.lock().unwrap().push(page);
        let count = self.history_items.min(page.items_per_page as usize);
        Ok((0..count)
            .map(|i| processing_task(&format!("vid_{i}")))
            .collect())
    }

    async fn remove_video(&self, _uid: &str, video_id: &str) -> DomainResult<()> {
        self.removed.lock().unwrap().push(video_id.to_string());
        Ok(())
    }

    async fn list_templates(&self) -> DomainResult<Vec<TemplateVideo>> {
        Ok(Vec::new())
    }
}
