use std::sync::Arc;

use uuid::Uuid;

use crate::client::ResourceClient;
use crate::error::DataError;
use crate::models::Comment;
use crate::store::{id_value, Datastore, Filter, Query};

pub struct CommentService {
    records: ResourceClient<Comment>,
}

impl CommentService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self {
            records: ResourceClient::new(store, "comments"),
        }
    }

    /// Plain CRUD on the comments collection.
    pub fn records(&self) -> &ResourceClient<Comment> {
        &self.records
    }

    pub async fn by_task(&self, task_id: Uuid) -> Result<Vec<Comment>, DataError> {
        let query = Query::new().filter(Filter::eq("task_id", id_value(task_id)));
        self.records.find(query).await
    }
}
