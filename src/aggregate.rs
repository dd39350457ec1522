use std::collections::HashSet;

use uuid::Uuid;

use crate::error::AggregateError;
use crate::models::{Project, ProjectStatus, Task, Team};
use crate::services::Services;

/// Which relationship a team lookup follows.
#[derive(Debug, Clone, Copy)]
pub enum TeamScope {
    Member(Uuid),
    Project(Uuid),
}

/// Which relationship a task lookup follows.
#[derive(Debug, Clone, Copy)]
pub enum TaskScope {
    Assignee(Uuid),
    Project(Uuid),
}

/// Cross-entity joins over the entity services. Pure orchestration: lookups
/// run as sequential awaited round trips in the documented order, results
/// merge through an id-keyed dedup in first-seen order, and any failure
/// discards partial results.
pub struct Aggregator<'a> {
    services: &'a Services,
}

impl<'a> Aggregator<'a> {
    pub fn new(services: &'a Services) -> Self {
        Self { services }
    }

    /// Every project the user can see: owned projects first, then projects
    /// reached through team membership (one `get_by_id` round trip per
    /// project not already present). `ongoing_only` filters the merged set
    /// down to status OnGoing.
    pub async fn projects_for_user(
        &self,
        user_id: Uuid,
        owner_only: bool,
        ongoing_only: bool,
    ) -> Result<Vec<Project>, AggregateError> {
        const CONTEXT: &str = "Error fetching your projects";
        let fail = |source| AggregateError::new(CONTEXT, source);

        let owned = self.services.projects.by_owner(user_id).await.map_err(fail)?;

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for project in owned {
            if let Some(id) = project.id {
                if !seen.insert(id) {
                    continue;
                }
            }
            merged.push(project);
        }

        if !owner_only {
            let teams = self.services.teams.by_member(user_id).await.map_err(fail)?;
            for team in teams {
                if seen.contains(&team.project_id) {
                    continue;
                }
                let project = self
                    .services
                    .projects
                    .records()
                    .get_by_id(team.project_id)
                    .await
                    .map_err(fail)?;
                seen.insert(team.project_id);
                merged.push(project);
            }
        }

        if ongoing_only {
            merged.retain(|project| project.status == ProjectStatus::OnGoing);
        }
        Ok(merged)
    }

    pub async fn teams_for(&self, scope: TeamScope) -> Result<Vec<Team>, AggregateError> {
        let teams = match scope {
            TeamScope::Member(user_id) => self
                .services
                .teams
                .by_member(user_id)
                .await
                .map_err(|e| AggregateError::new("Error fetching your teams", e))?,
            TeamScope::Project(project_id) => self
                .services
                .teams
                .by_project(project_id)
                .await
                .map_err(|e| AggregateError::new("Error fetching project teams", e))?,
        };
        Ok(dedup_by_id(teams, |team| team.id))
    }

    /// `due_this_week` only narrows assignee lookups; project-scoped fetches
    /// ignore it.
    pub async fn tasks_for(
        &self,
        scope: TaskScope,
        due_this_week: bool,
    ) -> Result<Vec<Task>, AggregateError> {
        const CONTEXT: &str = "Error fetching your tasks";
        let tasks = match scope {
            TaskScope::Assignee(user_id) if due_this_week => {
                self.services.tasks.due_this_week(user_id).await
            }
            TaskScope::Assignee(user_id) => self.services.tasks.by_assignee(user_id).await,
            TaskScope::Project(project_id) => self.services.tasks.by_project(project_id).await,
        };
        let tasks = tasks.map_err(|e| AggregateError::new(CONTEXT, e))?;
        Ok(dedup_by_id(tasks, |task| task.id))
    }
}

/// First-seen order, duplicate ids dropped. Records without an id cannot be
/// deduplicated and pass through.
fn dedup_by_id<T>(items: Vec<T>, id_of: impl Fn(&T) -> Option<Uuid>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(id) = id_of(&item) {
            if !seen.insert(id) {
                continue;
            }
        }
        out.push(item);
    }
    out
}
