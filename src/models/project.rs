use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "On hold")]
    OnHold,
    Blocked,
    #[serde(rename = "On going")]
    OnGoing,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Set client-side at construction; the store's returned value is
    /// authoritative.
    #[serde(with = "crate::dates::wire_time")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::dates::wire_time_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::dates::wire_time_opt")]
    pub end_date: Option<DateTime<Utc>>,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub status: ProjectStatus,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        owner_id: Uuid,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: None,
            created_at: Utc::now(),
            start_date,
            end_date,
            name: name.into(),
            description,
            owner_id,
            status: ProjectStatus::NotStarted,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "crate::dates::wire_time_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "crate::dates::wire_time_opt")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}
