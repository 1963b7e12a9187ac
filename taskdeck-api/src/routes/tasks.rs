/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks/` - List tasks
/// - `POST /tasks/` - Create a task owned by the caller (authenticated)
/// - `GET /tasks/:id` - Fetch one task
/// - `PUT /tasks/:id` - Replace a task
/// - `DELETE /tasks/:id` - Delete a task
///
/// Updates are full replacements: every mutable field is reapplied from the
/// request body, and optional fields omitted from the body revert to their
/// defaults.

use crate::{
    app::AppState,
    error::{validation_failure, ApiError, ApiResult},
    middleware::auth::{CurrentUser, OptionalUser},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::models::task::{CreateTask, Task, TaskFields, TaskPriority, TaskStatus};
use validator::Validate;

/// Task create/update request body
///
/// `status` and `priority` arrive as strings and are checked against their
/// closed vocabularies; an unrecognized value is rejected with a validation
/// error instead of being coerced or defaulted.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskPayload {
    /// Task title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Completion state ("todo", "in_progress", "done"), defaults to "todo"
    pub status: Option<String>,

    /// Priority ("low", "medium", "high"), defaults to "medium"
    pub priority: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPayload {
    /// Validates the payload and converts it into stored field values
    fn into_fields(self) -> Result<TaskFields, ApiError> {
        let status = match self.status.as_deref() {
            Some(value) => value.parse::<TaskStatus>()?,
            None => TaskStatus::default(),
        };

        let priority = match self.priority.as_deref() {
            Some(value) => value.parse::<TaskPriority>()?,
            None => TaskPriority::default(),
        };

        Ok(TaskFields {
            title: self.title,
            description: self.description,
            status,
            priority,
            due_date: self.due_date,
        })
    }
}

/// Delete confirmation response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Confirmation message
    pub message: String,
}

fn task_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Task with ID {} not found", id))
}

/// List tasks
///
/// By default every task is returned regardless of owner. When the service
/// is configured with `OWNER_SCOPED_TASKS=true` the listing requires a
/// bearer token and returns only the caller's tasks.
///
/// # Endpoint
///
/// ```text
/// GET /tasks/
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    OptionalUser(caller): OptionalUser,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = if state.config.tasks.owner_scoped {
        let caller = caller
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;
        Task::list_by_owner(&state.db, caller.id).await?
    } else {
        Task::list(&state.db).await?
    };

    Ok(Json(tasks))
}

/// Create a task
///
/// The caller's identity is stamped as the task owner.
///
/// # Endpoint
///
/// ```text
/// POST /tasks/
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "priority": "high"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `422 Unprocessable Entity`: Validation failed or unknown
///   status/priority value
pub async fn create_task(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<TaskPayload>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    payload.validate().map_err(validation_failure)?;

    let fields = payload.into_fields()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            fields,
            user_id: Some(current.id),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetch one task
///
/// # Endpoint
///
/// ```text
/// GET /tasks/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No task with that ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Replace a task
///
/// Overwrites every mutable field with the request body. Optional fields
/// omitted from the body revert to their defaults, and `updated_at` is
/// refreshed. Ownership is untouched.
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "status": "done"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No task with that ID
/// - `422 Unprocessable Entity`: Validation failed or unknown
///   status/priority value
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    payload.validate().map_err(validation_failure)?;

    let fields = payload.into_fields()?;

    let task = Task::replace(&state.db, id, fields)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Delete a task
///
/// # Endpoint
///
/// ```text
/// DELETE /tasks/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No task with that ID
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(task_not_found(id));
    }

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
