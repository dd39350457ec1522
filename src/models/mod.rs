mod comment;
mod project;
mod task;
mod team;
mod user;

pub use comment::{Comment, CommentPatch};
pub use project::{Project, ProjectPatch, ProjectStatus};
pub use task::{Task, TaskPatch, TaskPriority, TaskStatus};
pub use team::{Team, TeamPatch};
pub use user::{User, UserPatch, UserStatus};
