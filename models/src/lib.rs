//! Shared wire DTOs for the dashboard API boundary.
//!
//! DESIGN
//! ======
//! These types mirror the REST backend's serializer output so every consumer
//! (session resolver, auth context, resource wrappers) deserializes against
//! one explicit contract. A payload that does not match its declared shape is
//! an error at the boundary; identities and resources are never built from
//! partially decoded bodies.

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY & AUTH
// =============================================================================

/// The resolved user record, replaced wholesale on each successful resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique numeric user identifier.
    pub id: i64,
    /// Login email address.
    pub email: String,
    /// Given name; may be empty for accounts created before profiles existed.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Profile image URL, if set.
    #[serde(default)]
    pub profile_image: Option<String>,
    /// Contact phone number, if set.
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-form location string, if set.
    #[serde(default)]
    pub location: Option<String>,
    /// Short biography, if set.
    #[serde(default)]
    pub bio: Option<String>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO 8601 last-update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl User {
    /// Human-readable name: full name when present, email local part otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email
                .split('@')
                .next()
                .unwrap_or(self.email.as_str())
                .to_owned()
        } else {
            full.to_owned()
        }
    }
}

/// Successful login/register payload from the token issuer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer token proving identity on subsequent calls.
    pub token: String,
    /// The authenticated user, adopted directly without a second resolve.
    pub user: User,
}

/// Body of `POST /api/auth/login/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/register/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    /// Account handle; the backend requires one, derived from the email.
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    /// Build a registration body, deriving `username` from the email local part.
    #[must_use]
    pub fn new(email: &str, password: &str, first_name: &str, last_name: &str) -> Self {
        let username = email.split('@').next().unwrap_or(email).to_owned();
        Self {
            email: email.to_owned(),
            username,
            password: password.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
        }
    }
}

/// Error body shape the backend emits on non-2xx responses.
///
/// The backend is inconsistent about which key carries the human-readable
/// text, so all three observed keys are accepted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable message: `message`, then `detail`, then `error`,
    /// then the supplied fallback.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .or(self.error.as_deref())
            .unwrap_or(fallback)
            .to_owned()
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Paginated list envelope emitted by every collection endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of records across all pages.
    pub count: i64,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// Records on this page.
    pub results: Vec<T>,
}

// =============================================================================
// PROJECTS
// =============================================================================

/// Lifecycle status of a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO 8601 date the project starts.
    #[serde(default)]
    pub start_date: Option<String>,
    /// ISO 8601 date the project is due, if scheduled.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Completion percentage, 0 to 100.
    #[serde(default)]
    pub progress: i32,
    /// Owning user; embedded by the read serializer.
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /api/projects/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub status: ProjectStatus,
    pub progress: i32,
}

/// Partial update body for `PATCH /api/projects/{id}/`; only set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
}

// =============================================================================
// TASKS
// =============================================================================

/// Urgency of a task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Workflow status of a task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO 8601 due date, if scheduled.
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    /// Parent project; embedded by the read serializer.
    #[serde(default)]
    pub project: Option<Project>,
    /// Assignee, if any.
    #[serde(default)]
    pub assigned_to: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /api/tasks/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Parent project primary key; write-only on the backend.
    pub project_id: i64,
}

/// Partial update body for `PATCH /api/tasks/{id}/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
}

// =============================================================================
// COMMENTS, TEAMS, NOTIFICATIONS
// =============================================================================

/// A comment on a task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    /// Primary key of the task commented on.
    pub task: i64,
    /// Author; embedded by the read serializer.
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /api/tasks/{id}/comments/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /api/teams/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    /// Whether the user has acknowledged this notification.
    #[serde(default)]
    pub read: bool,
    /// ISO 8601 event timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// =============================================================================
// PROFILE & DASHBOARD
// =============================================================================

/// Partial update body for `PATCH /api/users/profile/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// A recent-activity line on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Aggregate counters for the dashboard landing page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub total_team_members: i64,
    pub pending_tasks: i64,
    #[serde(default)]
    pub recent_activities: Vec<Activity>,
}
