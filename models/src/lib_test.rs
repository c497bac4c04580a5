use super::*;
use serde_json::json;

// =============================================================================
// User / identity contract
// =============================================================================

#[test]
fn user_deserializes_full_profile() {
    let value = json!({
        "id": 42,
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "profile_image": "https://cdn.example.com/ada.png",
        "phone": "+44 20 7946 0000",
        "location": "London",
        "bio": "First programmer",
        "created_at": "2024-01-10T09:00:00Z",
        "updated_at": "2024-02-01T12:30:00Z"
    });
    let user: User = serde_json::from_value(value).unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.profile_image.as_deref(), Some("https://cdn.example.com/ada.png"));
}

#[test]
fn user_tolerates_missing_optional_fields() {
    let user: User = serde_json::from_value(json!({"id": 1, "email": "x@y.z"})).unwrap();
    assert_eq!(user.first_name, "");
    assert!(user.profile_image.is_none());
    assert!(user.created_at.is_none());
}

#[test]
fn user_missing_email_is_rejected() {
    let result: Result<User, _> = serde_json::from_value(json!({"id": 1, "first_name": "Ada"}));
    assert!(result.is_err(), "a payload without email must not produce a partial identity");
}

#[test]
fn user_missing_id_is_rejected() {
    let result: Result<User, _> = serde_json::from_value(json!({"email": "x@y.z"}));
    assert!(result.is_err());
}

#[test]
fn display_name_prefers_full_name() {
    let user: User = serde_json::from_value(json!({
        "id": 1, "email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace"
    }))
    .unwrap();
    assert_eq!(user.display_name(), "Ada Lovelace");
}

#[test]
fn display_name_falls_back_to_email_local_part() {
    let user: User = serde_json::from_value(json!({"id": 1, "email": "ada@example.com"})).unwrap();
    assert_eq!(user.display_name(), "ada");
}

#[test]
fn register_request_derives_username_from_email() {
    let req = RegisterRequest::new("grace.hopper@navy.mil", "pw", "Grace", "Hopper");
    assert_eq!(req.username, "grace.hopper");
    assert_eq!(req.email, "grace.hopper@navy.mil");
}

#[test]
fn auth_response_round_trip() {
    let value = json!({
        "token": "tok-123",
        "user": {"id": 7, "email": "u@example.com", "first_name": "U", "last_name": "Ser"}
    });
    let auth: AuthResponse = serde_json::from_value(value).unwrap();
    assert_eq!(auth.token, "tok-123");
    assert_eq!(auth.user.id, 7);
}

#[test]
fn auth_response_without_token_is_rejected() {
    let value = json!({"user": {"id": 7, "email": "u@example.com"}});
    let result: Result<AuthResponse, _> = serde_json::from_value(value);
    assert!(result.is_err());
}

// =============================================================================
// Error body precedence
// =============================================================================

#[test]
fn error_body_prefers_message_over_detail() {
    let body: ApiErrorBody =
        serde_json::from_value(json!({"message": "nope", "detail": "other"})).unwrap();
    assert_eq!(body.message_or("fallback"), "nope");
}

#[test]
fn error_body_uses_detail_when_message_absent() {
    let body: ApiErrorBody = serde_json::from_value(json!({"detail": "forbidden"})).unwrap();
    assert_eq!(body.message_or("fallback"), "forbidden");
}

#[test]
fn error_body_falls_back_when_empty() {
    let body = ApiErrorBody::default();
    assert_eq!(body.message_or("request failed"), "request failed");
}

// =============================================================================
// Pagination envelope
// =============================================================================

#[test]
fn paginated_envelope_deserializes() {
    let value = json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {"id": 1, "title": "Alpha", "description": "first"},
            {"id": 2, "title": "Beta", "description": "second"}
        ]
    });
    let page: Paginated<Project> = serde_json::from_value(value).unwrap();
    assert_eq!(page.count, 2);
    assert!(page.next.is_none());
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[1].title, "Beta");
}

// =============================================================================
// Projects & tasks
// =============================================================================

#[test]
fn project_status_uses_snake_case_literals() {
    assert_eq!(serde_json::to_value(ProjectStatus::NotStarted).unwrap(), json!("not_started"));
    assert_eq!(serde_json::to_value(ProjectStatus::InProgress).unwrap(), json!("in_progress"));
    let status: ProjectStatus = serde_json::from_value(json!("completed")).unwrap();
    assert_eq!(status, ProjectStatus::Completed);
}

#[test]
fn project_defaults_apply_for_sparse_payload() {
    let project: Project =
        serde_json::from_value(json!({"id": 3, "title": "Gamma"})).unwrap();
    assert_eq!(project.status, ProjectStatus::NotStarted);
    assert_eq!(project.progress, 0);
    assert!(project.user.is_none());
}

#[test]
fn project_patch_serializes_only_set_fields() {
    let patch = ProjectPatch { progress: Some(75), ..Default::default() };
    let value = serde_json::to_value(&patch).unwrap();
    assert_eq!(value, json!({"progress": 75}));
}

#[test]
fn new_task_serializes_write_only_project_id() {
    let task = NewTask {
        title: "Ship it".into(),
        description: "".into(),
        due_date: None,
        priority: TaskPriority::High,
        status: TaskStatus::Todo,
        project_id: 9,
    };
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["project_id"], json!(9));
    assert_eq!(value["priority"], json!("high"));
    assert_eq!(value["status"], json!("todo"));
    assert!(value.get("due_date").is_none());
}

#[test]
fn task_embeds_project_and_assignee_when_present() {
    let value = json!({
        "id": 11,
        "title": "Review",
        "priority": "low",
        "status": "in_progress",
        "project": {"id": 3, "title": "Gamma"},
        "assigned_to": {"id": 5, "email": "dev@example.com"}
    });
    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.priority, TaskPriority::Low);
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.project.as_ref().map(|p| p.id), Some(3));
    assert_eq!(task.assigned_to.as_ref().map(|u| u.id), Some(5));
}

// =============================================================================
// Notifications & dashboard
// =============================================================================

#[test]
fn notification_read_defaults_false() {
    let n: Notification =
        serde_json::from_value(json!({"id": 1, "message": "Task assigned"})).unwrap();
    assert!(!n.read);
}

#[test]
fn dashboard_stats_deserialize_with_activities() {
    let value = json!({
        "total_projects": 4,
        "total_tasks": 20,
        "total_team_members": 6,
        "pending_tasks": 8,
        "recent_activities": [
            {"message": "Project Alpha created", "timestamp": "2024-03-01T10:00:00Z"}
        ]
    });
    let stats: DashboardStats = serde_json::from_value(value).unwrap();
    assert_eq!(stats.pending_tasks, 8);
    assert_eq!(stats.recent_activities.len(), 1);
}

#[test]
fn dashboard_stats_tolerate_missing_activities() {
    let value = json!({
        "total_projects": 0, "total_tasks": 0, "total_team_members": 0, "pending_tasks": 0
    });
    let stats: DashboardStats = serde_json::from_value(value).unwrap();
    assert!(stats.recent_activities.is_empty());
}

#[test]
fn profile_patch_skips_unset_fields() {
    let patch = ProfilePatch { bio: Some("hi".into()), ..Default::default() };
    assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"bio": "hi"}));
}
