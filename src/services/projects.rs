use std::sync::Arc;

use mongodb::bson;
use uuid::Uuid;

use crate::client::ResourceClient;
use crate::error::DataError;
use crate::models::{Project, ProjectStatus};
use crate::store::{id_value, Datastore, Filter, Query};

pub struct ProjectService {
    records: ResourceClient<Project>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self {
            records: ResourceClient::new(store, "projects"),
        }
    }

    /// Plain CRUD on the projects collection.
    pub fn records(&self) -> &ResourceClient<Project> {
        &self.records
    }

    pub async fn by_owner(&self, owner_id: Uuid) -> Result<Vec<Project>, DataError> {
        let query = Query::new().filter(Filter::eq("owner_id", id_value(owner_id)));
        self.records.find(query).await
    }

    pub async fn by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, DataError> {
        let status = bson::to_bson(&status).map_err(DataError::decode)?;
        let query = Query::new().filter(Filter::eq("status", status));
        self.records.find(query).await
    }
}
