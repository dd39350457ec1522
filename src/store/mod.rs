mod blob;
mod memory;
mod mongo;

pub use blob::{BlobStore, GridFsBlobStore, MemoryBlobStore};
pub use memory::MemoryDatastore;
pub use mongo::MongoDatastore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document};
use uuid::Uuid;

use crate::dates;
use crate::error::BackendError;

/// Ids travel as their canonical string form.
pub fn id_value(id: Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Timestamps travel in the fixed-precision wire format the models store,
/// so range filters compare like against like even byte-wise.
pub fn time_value(at: &DateTime<Utc>) -> Bson {
    Bson::String(dates::to_wire(at))
}

#[derive(Debug, Clone)]
pub enum Filter {
    /// Field equals value.
    Eq(String, Bson),
    /// Field is at least value.
    Gte(String, Bson),
    /// Field is at most value.
    Lte(String, Bson),
    /// Case-insensitive substring match on a string field.
    ILike(String, String),
    /// Set-membership test against an array-valued field.
    Contains(String, Bson),
    /// Any nested filter matches.
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Gte(field.into(), value.into())
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Lte(field.into(), value.into())
    }

    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::ILike(field.into(), pattern.into())
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Contains(field.into(), value.into())
    }
}

/// One select against a collection: conjunctive filters plus an ascending
/// compound sort of at most two fields. Records with a null or missing sort
/// field order first, the store's default.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub sort: Vec<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort.push(field.into());
        self
    }
}

/// The abstract query protocol a backing store has to offer: named
/// collections of documents with filtered selects, inserts, partial updates
/// and deletes. Every call is one independent round trip.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Persists one new record. The store assigns `id` and is authoritative
    /// for it; the stored document is returned.
    async fn insert(&self, collection: &str, record: Document) -> Result<Document, BackendError>;

    async fn select(&self, collection: &str, query: Query) -> Result<Vec<Document>, BackendError>;

    /// Applies only the supplied fields to the record matching `id`.
    /// `Ok(None)` when no record matches.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: Document,
    ) -> Result<Option<Document>, BackendError>;

    /// Removes the record matching `id`. Deleting an absent id is not an
    /// error.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn time_values_use_the_stored_wire_format() {
        let due = Utc.with_ymd_and_hms(2025, 6, 15, 21, 59, 59).unwrap();
        let bound = Utc.with_ymd_and_hms(2025, 6, 15, 23, 59, 59).unwrap()
            + Duration::milliseconds(999);

        let (Bson::String(due), Bson::String(bound)) = (time_value(&due), time_value(&bound))
        else {
            panic!("timestamps travel as strings");
        };
        assert_eq!(due, "2025-06-15T21:59:59.000Z");
        // Byte-wise `lte` against the window bound must keep the
        // whole-second due date inside the window.
        assert!(due <= bound);
    }
}
