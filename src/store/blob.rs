use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::io::AsyncWriteExt;
use futures_util::StreamExt;
use log::debug;
use mongodb::bson::doc;
use mongodb::gridfs::GridFsBucket;
use mongodb::options::GridFsBucketOptions;
use mongodb::Database;

use crate::error::BackendError;

/// Blob storage namespaced by path prefix; profile images live under
/// `{user_id}/...` with a shared fallback file at the root.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), BackendError>;

    /// All stored paths starting with `prefix`, in no particular order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, BackendError>;

    /// Resolves a stored path to a publicly reachable URL. Pure string work,
    /// no round trip.
    fn public_url(&self, path: &str) -> String;
}

/// Production blob store over MongoDB GridFS.
pub struct GridFsBlobStore {
    bucket: GridFsBucket,
    base_url: String,
}

impl GridFsBlobStore {
    pub fn new(db: &Database, bucket_name: &str, base_url: &str) -> Self {
        let options = GridFsBucketOptions::builder()
            .bucket_name(bucket_name.to_string())
            .build();
        Self {
            bucket: db.gridfs_bucket(options),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for GridFsBlobStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), BackendError> {
        let mut stream = self.bucket.open_upload_stream(path).await?;
        stream
            .write_all(bytes)
            .await
            .map_err(|e| BackendError::new(e.to_string()))?;
        stream
            .close()
            .await
            .map_err(|e| BackendError::new(e.to_string()))?;
        debug!("uploaded blob {}", path);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, BackendError> {
        let filter = doc! { "filename": { "$regex": format!("^{}", regex::escape(prefix)) } };
        let mut cursor = self.bucket.find(filter).await?;
        let mut paths = Vec::new();
        while let Some(file) = cursor.next().await {
            if let Some(name) = file?.filename {
                paths.push(name);
            }
        }
        Ok(paths)
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// In-process blob store backing the tests.
#[derive(Default)]
pub struct MemoryBlobStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    base_url: String,
}

impl MemoryBlobStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), BackendError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, BackendError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|path| path.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
