use std::sync::Arc;

use uuid::Uuid;

use crate::client::ResourceClient;
use crate::error::DataError;
use crate::models::Team;
use crate::store::{id_value, Datastore, Filter, Query};

pub struct TeamService {
    records: ResourceClient<Team>,
}

impl TeamService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self {
            records: ResourceClient::new(store, "teams"),
        }
    }

    /// Plain CRUD on the teams collection.
    pub fn records(&self) -> &ResourceClient<Team> {
        &self.records
    }

    pub async fn by_project(&self, project_id: Uuid) -> Result<Vec<Team>, DataError> {
        let query = Query::new().filter(Filter::eq("project_id", id_value(project_id)));
        self.records.find(query).await
    }

    /// Membership test against `members_ids`, not an exact match.
    pub async fn by_member(&self, member_id: Uuid) -> Result<Vec<Team>, DataError> {
        let query = Query::new().filter(Filter::contains("members_ids", id_value(member_id)));
        self.records.find(query).await
    }
}
