//! Video task entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::VideoError;

/// Status of a generation task.
///
/// The backend reports statuses in several conventions (`SUCCEEDED`,
/// `completed`, `IN_PROGRESS`, ...); `from_raw` is the one place raw values
/// are reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoStatus {
    Processing,
    Succeeded,
    Failed,
    Unknown(String),
}

impl VideoStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "processing" | "in_progress" | "pending" | "queued" => VideoStatus::Processing,
            "succeeded" | "completed" | "success" => VideoStatus::Succeeded,
            "failed" | "error" => VideoStatus::Failed,
            _ => VideoStatus::Unknown(raw.to_string()),
        }
    }

    /// A task is ready exactly when generation succeeded
    pub fn is_ready(&self) -> bool {
        matches!(self, VideoStatus::Succeeded)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Succeeded | VideoStatus::Failed)
    }
}

/// One generation task, as normalized from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTask {
    /// Backend-issued identifier
    pub video_id: String,

    /// Prompt the task was created with (empty in template mode)
    pub prompt_text: String,

    /// Current status
    pub status: VideoStatus,

    /// Playable URL once generation succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Creation time when the backend supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl VideoTask {
    /// Whether the task can be previewed/downloaded
    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    /// The playable URL, or a resource error naming the task
    pub fn playable_url(&self) -> Result<&str, VideoError> {
        self.video_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| VideoError::MissingVideoUrl {
                video_id: self.video_id.clone(),
            })
    }
}
