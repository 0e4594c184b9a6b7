//! Display shape for video history rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vd_core::domain::entities::{VideoStatus, VideoTask};

/// One display-ready history row
#[derive(Debug, Clone, Serialize)]
pub struct VideoDisplayItem {
    pub video_id: String,
    pub prompt_text: String,
    /// Human label for the raw status
    pub status_label: String,
    /// Human-relative age, e.g. "2h ago"; empty when the backend did not
    /// report a creation time
    pub age_label: String,
    /// Whether preview/download/share are available
    pub is_ready: bool,
    pub video_url: Option<String>,
}

impl VideoDisplayItem {
    /// Build a display row against an explicit clock
    pub fn from_task_at(task: &VideoTask, now: DateTime<Utc>) -> Self {
        Self {
            video_id: task.video_id.clone(),
            prompt_text: task.prompt_text.clone(),
            status_label: status_label(&task.status).to_string(),
            age_label: task
                .created_at
                .map(|created| relative_age(created, now))
                .unwrap_or_default(),
            is_ready: task.is_ready(),
            video_url: task.video_url.clone(),
        }
    }
}

impl From<&VideoTask> for VideoDisplayItem {
    fn from(task: &VideoTask) -> Self {
        Self::from_task_at(task, Utc::now())
    }
}

fn status_label(status: &VideoStatus) -> &str {
    match status {
        VideoStatus::Processing => "Generating...",
        VideoStatus::Succeeded => "Ready",
        VideoStatus::Failed => "Failed",
        VideoStatus::Unknown(raw) => raw,
    }
}

/// Compact relative age: "just now", "5m ago", "2h ago", "3d ago"
fn relative_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - created;
    let seconds = elapsed.num_seconds().max(0);

    if seconds < 60 {
        String::from("just now")
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}
