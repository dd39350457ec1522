use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Database};
use uuid::Uuid;

use super::{Datastore, Filter, Query};
use crate::error::BackendError;

/// Production datastore over MongoDB. Collections map one-to-one onto the
/// protocol's collections; ids live in a plain `id` field.
pub struct MongoDatastore {
    db: Database,
}

impl MongoDatastore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, BackendError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self {
            db: client.database(db_name),
        })
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn filter_doc(filter: &Filter) -> Document {
    let mut out = Document::new();
    match filter {
        Filter::Eq(field, value) => {
            out.insert(field.clone(), value.clone());
        }
        Filter::Gte(field, value) => {
            out.insert(field.clone(), doc! { "$gte": value.clone() });
        }
        Filter::Lte(field, value) => {
            out.insert(field.clone(), doc! { "$lte": value.clone() });
        }
        Filter::ILike(field, pattern) => {
            out.insert(
                field.clone(),
                doc! { "$regex": regex::escape(pattern), "$options": "i" },
            );
        }
        Filter::Contains(field, value) => {
            out.insert(field.clone(), doc! { "$elemMatch": { "$eq": value.clone() } });
        }
        Filter::Or(filters) => {
            let clauses: Vec<Document> = filters.iter().map(filter_doc).collect();
            out.insert("$or", clauses);
        }
    }
    out
}

fn query_doc(query: &Query) -> Document {
    match query.filters.len() {
        0 => Document::new(),
        1 => filter_doc(&query.filters[0]),
        // separate clauses under $and so the same field can appear in
        // several filters (e.g. a gte/lte range)
        _ => {
            let clauses: Vec<Document> = query.filters.iter().map(filter_doc).collect();
            doc! { "$and": clauses }
        }
    }
}

#[async_trait]
impl Datastore for MongoDatastore {
    async fn insert(&self, collection: &str, mut record: Document) -> Result<Document, BackendError> {
        if !record.contains_key("id") {
            record.insert("id", Uuid::new_v4().to_string());
        }
        let coll = self.db.collection::<Document>(collection);
        coll.insert_one(&record).await?;
        debug!("inserted into {}", collection);
        Ok(record)
    }

    async fn select(&self, collection: &str, query: Query) -> Result<Vec<Document>, BackendError> {
        let coll = self.db.collection::<Document>(collection);
        let filter = query_doc(&query);
        debug!("select {} filter {:?}", collection, filter);

        let mut find = coll.find(filter);
        if !query.sort.is_empty() {
            let mut sort = Document::new();
            for field in query.sort.iter().take(2) {
                sort.insert(field.clone(), Bson::Int32(1));
            }
            find = find.sort(sort);
        }

        let mut cursor = find.await?;
        let mut records = Vec::new();
        while let Some(record) = cursor.next().await {
            records.push(record?);
        }
        Ok(records)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: Document,
    ) -> Result<Option<Document>, BackendError> {
        let coll = self.db.collection::<Document>(collection);
        let updated = coll
            .find_one_and_update(doc! { "id": id.to_string() }, doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), BackendError> {
        let coll = self.db.collection::<Document>(collection);
        coll.delete_one(doc! { "id": id.to_string() }).await?;
        Ok(())
    }
}
