use std::marker::PhantomData;
use std::sync::Arc;

use log::warn;
use mongodb::bson::{self, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::DataError;
use crate::store::{id_value, Datastore, Filter, Query};

/// Generic CRUD access to one backing collection. Every operation is a
/// single round trip; no retries, no caching, no client-side validation
/// beyond what the entity types enforce.
pub struct ResourceClient<T> {
    store: Arc<dyn Datastore>,
    collection: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> ResourceClient<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn Datastore>, collection: &str) -> Self {
        Self {
            store,
            collection: collection.to_string(),
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persists one new record; the store assigns `id` and the returned
    /// record is the stored one.
    pub async fn create(&self, item: &T) -> Result<T, DataError> {
        let record = bson::to_document(item).map_err(DataError::decode)?;
        let stored = self.store.insert(&self.collection, record).await?;
        from_record(stored)
    }

    /// Every record in the collection; an empty collection is an empty Vec,
    /// never an error.
    pub async fn get_all(&self) -> Result<Vec<T>, DataError> {
        self.find(Query::new()).await
    }

    pub async fn find(&self, query: Query) -> Result<Vec<T>, DataError> {
        let records = self.store.select(&self.collection, query).await?;
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            match from_record(record) {
                Ok(item) => items.push(item),
                Err(err) => warn!("skipping undecodable record in {}: {}", self.collection, err),
            }
        }
        Ok(items)
    }

    /// Exactly one record is expected; zero matches is `DataError::NotFound`
    /// by contract, never a null result.
    pub async fn get_by_id(&self, id: Uuid) -> Result<T, DataError> {
        let query = Query::new().filter(Filter::eq("id", id_value(id)));
        let records = self.store.select(&self.collection, query).await?;
        if records.len() > 1 {
            // Ids are unique by invariant; more than one match means the
            // collection is corrupted.
            warn!(
                "{} records in {} share id {}, returning the first",
                records.len(),
                self.collection,
                id
            );
        }
        match records.into_iter().next() {
            Some(record) => from_record(record),
            None => Err(DataError::not_found(&self.collection, id)),
        }
    }

    /// Partial update: only fields present in the serialized patch change.
    pub async fn update(&self, patch: &impl Serialize, id: Uuid) -> Result<T, DataError> {
        let changes = bson::to_document(patch).map_err(DataError::decode)?;
        match self.store.update(&self.collection, id, changes).await? {
            Some(record) => from_record(record),
            None => Err(DataError::not_found(&self.collection, id)),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        self.store.delete(&self.collection, id).await?;
        Ok(())
    }
}

fn from_record<T: DeserializeOwned>(record: Document) -> Result<T, DataError> {
    bson::from_document(record).map_err(DataError::decode)
}
