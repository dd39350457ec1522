use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;
use mongodb::bson::{Bson, Document};
use uuid::Uuid;

use super::{Datastore, Filter, Query};
use crate::error::BackendError;

/// In-process datastore implementing the same query protocol as the MongoDB
/// one. Backs the integration tests and local development; it mirrors the
/// production store's observable semantics, in particular nulls ordering
/// first under an ascending sort.
#[derive(Default)]
pub struct MemoryDatastore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failures: Mutex<HashMap<String, String>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation against `collection` fail with `message` until
    /// cleared. Lets tests exercise error paths deterministically.
    pub fn fail_collection(&self, collection: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(collection.to_string(), message.to_string());
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    fn check_failure(&self, collection: &str) -> Result<(), BackendError> {
        match self.failures.lock().unwrap().get(collection) {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(()),
        }
    }
}

fn matches(record: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(field, value) => record.get(field) == Some(value),
        Filter::Gte(field, value) => {
            compare(record.get(field), value).is_some_and(|ord| ord != Ordering::Less)
        }
        Filter::Lte(field, value) => {
            compare(record.get(field), value).is_some_and(|ord| ord != Ordering::Greater)
        }
        Filter::ILike(field, pattern) => record
            .get_str(field)
            .is_ok_and(|s| s.to_lowercase().contains(&pattern.to_lowercase())),
        Filter::Contains(field, value) => record
            .get_array(field)
            .is_ok_and(|items| items.contains(value)),
        Filter::Or(filters) => filters.iter().any(|f| matches(record, f)),
    }
}

/// Range comparison; `None` when the field is absent, null or of a foreign
/// type, which excludes the record from the range (as the production store
/// does).
fn compare(lhs: Option<&Bson>, rhs: &Bson) -> Option<Ordering> {
    match (lhs?, rhs) {
        (Bson::String(a), Bson::String(b)) => Some(compare_strings(a, b)),
        (Bson::Int32(a), Bson::Int32(b)) => Some(a.cmp(b)),
        (Bson::Int64(a), Bson::Int64(b)) => Some(a.cmp(b)),
        (Bson::Double(a), Bson::Double(b)) => a.partial_cmp(b),
        _ => None,
    }
}

/// Timestamp strings compare as instants when both sides parse, so mixed
/// fractional precision cannot skew the order.
fn compare_strings(a: &str, b: &str) -> Ordering {
    match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

fn sort_key_order(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    fn normalize(v: Option<&Bson>) -> Option<&Bson> {
        match v {
            None | Some(Bson::Null) => None,
            other => other,
        }
    }
    match (normalize(a), normalize(b)) {
        (None, None) => Ordering::Equal,
        // nulls first under ascending order
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare(Some(a), b).unwrap_or(Ordering::Equal),
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn insert(&self, collection: &str, mut record: Document) -> Result<Document, BackendError> {
        self.check_failure(collection)?;
        if !record.contains_key("id") {
            record.insert("id", Uuid::new_v4().to_string());
        }
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn select(&self, collection: &str, query: Query) -> Result<Vec<Document>, BackendError> {
        self.check_failure(collection)?;
        let collections = self.collections.lock().unwrap();
        let mut records: Vec<Document> = collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| query.filters.iter().all(|f| matches(r, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if !query.sort.is_empty() {
            let fields: Vec<&String> = query.sort.iter().take(2).collect();
            records.sort_by(|a, b| {
                for field in &fields {
                    let ord = sort_key_order(a.get(*field), b.get(*field));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }
        Ok(records)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: Document,
    ) -> Result<Option<Document>, BackendError> {
        self.check_failure(collection)?;
        let id = Bson::String(id.to_string());
        let mut collections = self.collections.lock().unwrap();
        let records = match collections.get_mut(collection) {
            Some(records) => records,
            None => return Ok(None),
        };
        for record in records.iter_mut() {
            if record.get("id") == Some(&id) {
                for (field, value) in changes {
                    record.insert(field, value);
                }
                return Ok(Some(record.clone()));
            }
        }
        Ok(None)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), BackendError> {
        self.check_failure(collection)?;
        let id = Bson::String(id.to_string());
        let mut collections = self.collections.lock().unwrap();
        if let Some(records) = collections.get_mut(collection) {
            records.retain(|record| record.get("id") != Some(&id));
        }
        Ok(())
    }
}
