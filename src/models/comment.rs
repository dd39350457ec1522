use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(with = "crate::dates::wire_time")]
    pub created_at: DateTime<Utc>,
    pub text: String,
    pub user_id: Uuid,
    pub task_id: Uuid,
}

impl Comment {
    pub fn new(text: impl Into<String>, user_id: Uuid, task_id: Uuid) -> Self {
        Self {
            id: None,
            created_at: Utc::now(),
            text: text.into(),
            user_id,
            task_id,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CommentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
