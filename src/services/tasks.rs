use std::sync::Arc;

use mongodb::bson;
use uuid::Uuid;

use crate::client::ResourceClient;
use crate::dates;
use crate::error::DataError;
use crate::models::{Task, TaskStatus};
use crate::store::{id_value, time_value, Datastore, Filter, Query};

pub struct TaskService {
    records: ResourceClient<Task>,
}

/// Task queries share one ordering: start date then end date, ascending,
/// null dates first.
fn ordered() -> Query {
    Query::new().sort_asc("start_date").sort_asc("end_date")
}

impl TaskService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self {
            records: ResourceClient::new(store, "tasks"),
        }
    }

    /// Plain CRUD on the tasks collection.
    pub fn records(&self) -> &ResourceClient<Task> {
        &self.records
    }

    pub async fn by_project(&self, project_id: Uuid) -> Result<Vec<Task>, DataError> {
        let query = ordered().filter(Filter::eq("project_id", id_value(project_id)));
        self.records.find(query).await
    }

    pub async fn by_project_and_status(
        &self,
        project_id: Uuid,
        status: TaskStatus,
    ) -> Result<Vec<Task>, DataError> {
        let status = bson::to_bson(&status).map_err(DataError::decode)?;
        let query = ordered()
            .filter(Filter::eq("project_id", id_value(project_id)))
            .filter(Filter::eq("status", status));
        self.records.find(query).await
    }

    /// Membership test against `assignees_ids`, not an exact match.
    pub async fn by_assignee(&self, assignee_id: Uuid) -> Result<Vec<Task>, DataError> {
        let query = ordered().filter(Filter::contains("assignees_ids", id_value(assignee_id)));
        self.records.find(query).await
    }

    /// Assignee's tasks whose `end_date` falls inside the current week,
    /// boundaries inclusive.
    pub async fn due_this_week(&self, assignee_id: Uuid) -> Result<Vec<Task>, DataError> {
        let (start, end) = dates::current_week_window();
        let query = ordered()
            .filter(Filter::contains("assignees_ids", id_value(assignee_id)))
            .filter(Filter::gte("end_date", time_value(&start)))
            .filter(Filter::lte("end_date", time_value(&end)));
        self.records.find(query).await
    }
}
