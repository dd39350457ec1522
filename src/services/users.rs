use std::sync::Arc;

use chrono::Utc;
use log::warn;
use uuid::Uuid;

use crate::client::ResourceClient;
use crate::dates;
use crate::error::DataError;
use crate::models::User;
use crate::session::SessionProvider;
use crate::store::{BlobStore, Datastore, Filter, Query};

/// Bundled placeholder served when neither a user image nor the shared
/// default exists in the bucket.
pub const LOCAL_DEFAULT_AVATAR: &str = "/assets/icons/defaultPfp.png";

pub struct UserService {
    records: ResourceClient<User>,
    blobs: Arc<dyn BlobStore>,
    session: Arc<dyn SessionProvider>,
    default_avatar_file: String,
}

impl UserService {
    pub fn new(
        store: Arc<dyn Datastore>,
        blobs: Arc<dyn BlobStore>,
        session: Arc<dyn SessionProvider>,
        default_avatar_file: &str,
    ) -> Self {
        Self {
            records: ResourceClient::new(store, "users"),
            blobs,
            session,
            default_avatar_file: default_avatar_file.to_string(),
        }
    }

    /// Plain CRUD on the users collection.
    pub fn records(&self) -> &ResourceClient<User> {
        &self.records
    }

    /// The currently signed-in user, built from session metadata rather than
    /// a row read. `Ok(None)` when unauthenticated.
    pub async fn current_user(&self) -> Result<Option<User>, DataError> {
        let identity = match self.session.current_identity().await? {
            Some(identity) => identity,
            None => return Ok(None),
        };
        let meta = identity.metadata;
        Ok(Some(User::new(
            identity.id,
            meta.first_name,
            meta.last_name,
            identity.email,
            meta.phone_number,
            meta.job_title,
            meta.status,
        )))
    }

    /// Case-insensitive substring search across email, first name and last
    /// name, OR-combined.
    pub async fn search(&self, info: &str) -> Result<Vec<User>, DataError> {
        let query = Query::new().filter(Filter::Or(vec![
            Filter::ilike("email", info),
            Filter::ilike("first_name", info),
            Filter::ilike("last_name", info),
        ]));
        self.records.find(query).await
    }

    /// Stores an avatar under the user's namespace. File names embed the
    /// upload instant so the newest one sorts last.
    pub async fn upload_avatar(
        &self,
        user_id: Uuid,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), DataError> {
        let ext = file_name.rsplit('.').next().unwrap_or("png");
        let path = format!("{}/{}-{}.{}", user_id, dates::to_wire(&Utc::now()), user_id, ext);
        self.blobs.upload(&path, bytes).await?;
        Ok(())
    }

    /// Resolves a profile image to a URL: the user's newest upload, else the
    /// shared default file, else the bundled placeholder. A missing avatar is
    /// never an error.
    pub async fn avatar_url(&self, user_id: Uuid) -> Result<String, DataError> {
        let mut files = self.blobs.list(&format!("{}/", user_id)).await?;
        files.sort();
        if let Some(newest) = files.pop() {
            return Ok(self.blobs.public_url(&newest));
        }

        match self.blobs.list(&self.default_avatar_file).await {
            Ok(defaults) if defaults.iter().any(|f| f == &self.default_avatar_file) => {
                Ok(self.blobs.public_url(&self.default_avatar_file))
            }
            Ok(_) => Ok(LOCAL_DEFAULT_AVATAR.to_string()),
            Err(err) => {
                warn!("default avatar lookup failed: {}", err);
                Ok(LOCAL_DEFAULT_AVATAR.to_string())
            }
        }
    }
}
