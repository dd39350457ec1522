use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To-do")]
    ToDo,
    #[serde(rename = "On hold")]
    OnHold,
    Blocked,
    #[serde(rename = "In progress")]
    InProgress,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(with = "crate::dates::wire_time")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::dates::wire_time_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::dates::wire_time_opt")]
    pub end_date: Option<DateTime<Utc>>,
    pub name: String,
    pub description: Option<String>,
    pub project_id: Uuid,
    /// Set semantics; duplicate ids carry no meaning.
    pub assignees_ids: Vec<Uuid>,
    pub priority: Option<TaskPriority>,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        project_id: Uuid,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        description: Option<String>,
        assignees_ids: Vec<Uuid>,
        priority: Option<TaskPriority>,
    ) -> Self {
        Self {
            id: None,
            created_at: Utc::now(),
            start_date,
            end_date,
            name: name.into(),
            description,
            project_id,
            assignees_ids,
            priority,
            status: TaskStatus::ToDo,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "crate::dates::wire_time_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "crate::dates::wire_time_opt")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults_to_todo() {
        let task = Task::new("Write docs", Uuid::new_v4(), None, None, None, vec![], None);
        assert_eq!(task.status, TaskStatus::ToDo);
        assert!(task.priority.is_none());
    }

    #[test]
    fn status_wire_strings() {
        assert_eq!(
            serde_json::to_value(TaskStatus::ToDo).unwrap(),
            serde_json::json!("To-do")
        );
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("In progress")
        );
    }

    #[test]
    fn dates_serialize_in_the_fixed_wire_format() {
        use chrono::TimeZone;

        let end = Utc.with_ymd_and_hms(2025, 6, 15, 21, 59, 59).unwrap();
        let mut task = Task::new("Ship", Uuid::new_v4(), None, Some(end), None, vec![], None);
        task.created_at = end;
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["end_date"], serde_json::json!("2025-06-15T21:59:59.000Z"));
        assert_eq!(value["created_at"], serde_json::json!("2025-06-15T21:59:59.000Z"));

        let back: Task = serde_json::from_value(value).unwrap();
        assert_eq!(back.end_date, Some(end));
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "Done" }));
    }
}
