#![allow(dead_code)]

use std::sync::Arc;

use taskhub_data::config::Config;
use taskhub_data::session::{SessionProvider, StaticSession};
use taskhub_data::store::{BlobStore, MemoryBlobStore, MemoryDatastore};
use taskhub_data::Services;

pub fn test_config() -> Config {
    Config {
        mongo_uri: "mongodb://localhost:27017".to_string(),
        database_name: "taskhub-test".to_string(),
        jwt_secret: "test-secret".to_string(),
        avatars_bucket: "avatars".to_string(),
        default_avatar_file: "defaultPfp.png".to_string(),
        public_storage_url: "http://storage.test".to_string(),
    }
}

pub fn services(store: Arc<MemoryDatastore>) -> Services {
    services_with(
        store,
        Arc::new(MemoryBlobStore::new("http://storage.test")),
        Arc::new(StaticSession::anonymous()),
    )
}

pub fn services_with(
    store: Arc<MemoryDatastore>,
    blobs: Arc<dyn BlobStore>,
    session: Arc<dyn SessionProvider>,
) -> Services {
    taskhub_data::logging::init_for_tests();
    Services::new(store, blobs, session, &test_config())
}
