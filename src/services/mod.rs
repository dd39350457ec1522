pub mod comments;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;

pub use comments::CommentService;
pub use projects::ProjectService;
pub use tasks::TaskService;
pub use teams::TeamService;
pub use users::UserService;

use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionProvider;
use crate::store::{BlobStore, Datastore};

/// The one instance of each entity service, constructed at process start and
/// passed by reference to consumers. Services never call each other; all
/// cross-entity joins live in the aggregation layer.
pub struct Services {
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub teams: TeamService,
    pub comments: CommentService,
}

impl Services {
    pub fn new(
        store: Arc<dyn Datastore>,
        blobs: Arc<dyn BlobStore>,
        session: Arc<dyn SessionProvider>,
        config: &Config,
    ) -> Self {
        Self {
            users: UserService::new(
                store.clone(),
                blobs,
                session,
                &config.default_avatar_file,
            ),
            projects: ProjectService::new(store.clone()),
            tasks: TaskService::new(store.clone()),
            teams: TeamService::new(store.clone()),
            comments: CommentService::new(store),
        }
    }
}
