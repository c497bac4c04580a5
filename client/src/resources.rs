//! Typed wrappers over the external resource API.
//!
//! One wrapper per dashboard fetch: thin, path-building only. All transport,
//! credential, and classification behavior lives in [`ApiClient`].

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;

use models::{
    Comment, DashboardStats, NewComment, NewProject, NewTask, NewTeam, Notification, Paginated,
    ProfilePatch, Project, ProjectPatch, Task, TaskPatch, Team, User,
};

use crate::api::{ApiClient, PROFILE_PATH};
use crate::error::ApiError;

const PROJECTS_PATH: &str = "/api/projects/";
const TASKS_PATH: &str = "/api/tasks/";
const TEAMS_PATH: &str = "/api/teams/";
const NOTIFICATIONS_PATH: &str = "/api/notifications/";
const DASHBOARD_STATS_PATH: &str = "/api/users/dashboard_stats/";

fn list_path(base: &str, limit: Option<i64>) -> String {
    match limit {
        Some(limit) => format!("{base}?limit={limit}"),
        None => base.to_owned(),
    }
}

fn item_path(base: &str, id: i64) -> String {
    format!("{base}{id}/")
}

fn task_comments_path(task_id: i64) -> String {
    format!("{TASKS_PATH}{task_id}/comments/")
}

fn notification_read_path(id: i64) -> String {
    format!("{NOTIFICATIONS_PATH}{id}/read/")
}

#[allow(clippy::missing_errors_doc)]
impl ApiClient {
    // ========================================================================
    // PROJECTS
    // ========================================================================

    pub async fn projects(&self, limit: Option<i64>) -> Result<Paginated<Project>, ApiError> {
        self.get(&list_path(PROJECTS_PATH, limit)).await
    }

    pub async fn project(&self, id: i64) -> Result<Project, ApiError> {
        self.get(&item_path(PROJECTS_PATH, id)).await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        self.post(PROJECTS_PATH, project).await
    }

    pub async fn update_project(&self, id: i64, patch: &ProjectPatch) -> Result<Project, ApiError> {
        self.patch(&item_path(PROJECTS_PATH, id), patch).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_path(PROJECTS_PATH, id)).await
    }

    // ========================================================================
    // TASKS & COMMENTS
    // ========================================================================

    pub async fn tasks(&self, limit: Option<i64>) -> Result<Paginated<Task>, ApiError> {
        self.get(&list_path(TASKS_PATH, limit)).await
    }

    pub async fn task(&self, id: i64) -> Result<Task, ApiError> {
        self.get(&item_path(TASKS_PATH, id)).await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.post(TASKS_PATH, task).await
    }

    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.patch(&item_path(TASKS_PATH, id), patch).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_path(TASKS_PATH, id)).await
    }

    /// Comments for a task; the backend returns a bare array here, not the
    /// pagination envelope.
    pub async fn task_comments(&self, task_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.get(&task_comments_path(task_id)).await
    }

    pub async fn create_comment(&self, task_id: i64, content: &str) -> Result<Comment, ApiError> {
        let body = NewComment { content: content.to_owned() };
        self.post(&task_comments_path(task_id), &body).await
    }

    // ========================================================================
    // TEAMS
    // ========================================================================

    pub async fn teams(&self) -> Result<Paginated<Team>, ApiError> {
        self.get(TEAMS_PATH).await
    }

    pub async fn team(&self, id: i64) -> Result<Team, ApiError> {
        self.get(&item_path(TEAMS_PATH, id)).await
    }

    pub async fn create_team(&self, team: &NewTeam) -> Result<Team, ApiError> {
        self.post(TEAMS_PATH, team).await
    }

    // ========================================================================
    // NOTIFICATIONS
    // ========================================================================

    pub async fn notifications(&self) -> Result<Paginated<Notification>, ApiError> {
        self.get(NOTIFICATIONS_PATH).await
    }

    pub async fn mark_notification_read(&self, id: i64) -> Result<(), ApiError> {
        self.post_empty(&notification_read_path(id)).await
    }

    // ========================================================================
    // PROFILE & DASHBOARD
    // ========================================================================

    /// Profile updates go through the same wholesale-replacement rule as
    /// resolution: the returned record replaces the cached one entirely.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<User, ApiError> {
        self.patch(PROFILE_PATH, patch).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get(DASHBOARD_STATS_PATH).await
    }
}
