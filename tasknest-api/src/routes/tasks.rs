/// Task endpoints
///
/// All task routes require a token; every operation is scoped to tasks owned
/// by the authenticated user. The owner reference is taken from the token at
/// creation and is never client-mutable. Task reads return the task with its
/// ordered note list populated.
///
/// # Endpoints
///
/// - `POST /tasks` - Create a task for the authenticated user
/// - `GET /tasks` - List the authenticated user's tasks
/// - `GET /tasks/:task_id` - Read an owned task
/// - `PUT /tasks/:task_id` - Update an owned task (partial)
/// - `DELETE /tasks/:task_id` - Destroy an owned task and its notes

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    ownership,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tasknest_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, TaskPriority, TaskStatus, TaskWithNotes, UpdateTask},
    validation,
};

/// Task create / update request body
///
/// Priority and status arrive as their wire strings and are checked against
/// the allowed values before being parsed into the typed enums.
#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    /// Task description
    pub description: Option<String>,

    /// Task priority ("a", "b", "c")
    pub priority: Option<String>,

    /// Task status ("incomplete", "in progress", "completed", "forwarded")
    pub status: Option<String>,
}

/// Create a task owned by the authenticated user
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// {
///   "description": "Buy milk",
///   "priority": "a",
///   "status": "incomplete"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<(StatusCode, Json<TaskWithNotes>)> {
    validation::validate_task(
        req.description.as_deref(),
        req.priority.as_deref(),
        req.status.as_deref(),
    )
    .map_err(|msg| ApiError::Validation(msg.to_string()))?;

    // Validation guarantees these parse
    let priority = req
        .priority
        .as_deref()
        .and_then(TaskPriority::parse)
        .ok_or_else(|| ApiError::Validation(validation::messages::PRIORITY_INVALID.to_string()))?;
    let status = req
        .status
        .as_deref()
        .and_then(TaskStatus::parse)
        .ok_or_else(|| ApiError::Validation(validation::messages::STATUS_INVALID.to_string()))?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            description: req.description.unwrap_or_default(),
            priority,
            status,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskWithNotes {
            task,
            notes: vec![],
        }),
    ))
}

/// List the authenticated user's tasks, oldest first, notes populated
pub async fn read_all(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskWithNotes>>> {
    let tasks = Task::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(tasks))
}

/// Read an owned task with its ordered note list
///
/// # Errors
///
/// - `400 Bad Request`: Malformed task ID
/// - `401 Unauthorized`: Task belongs to a different user
/// - `404 Not Found`: No task with this ID
pub async fn read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskWithNotes>> {
    let task = ownership::resolve_task(&state.db, &auth, &task_id).await?;

    Ok(Json(task.with_notes(&state.db).await?))
}

/// Update an owned task (partial)
///
/// Absent fields are left untouched; present fields are validated with the
/// same rules as on create. The owner and note list cannot be changed here.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed task ID or validation failed
/// - `401 Unauthorized`: Task belongs to a different user
/// - `404 Not Found`: No task with this ID
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<TaskWithNotes>> {
    let current = ownership::resolve_task(&state.db, &auth, &task_id).await?;

    validation::validate_task_update(
        req.description.as_deref(),
        req.priority.as_deref(),
        req.status.as_deref(),
    )
    .map_err(|msg| ApiError::Validation(msg.to_string()))?;

    let priority = req.priority.as_deref().and_then(TaskPriority::parse);
    let status = req.status.as_deref().and_then(TaskStatus::parse);

    let updated = Task::update(
        &state.db,
        current.id,
        UpdateTask {
            description: req.description,
            priority,
            status,
        },
    )
    .await?
    .ok_or_else(|| {
        ApiError::NotFound("No task associated with that ID was found.".to_string())
    })?;

    Ok(Json(updated.with_notes(&state.db).await?))
}

/// Destroy an owned task and all of its notes
///
/// # Errors
///
/// - `400 Bad Request`: Malformed task ID
/// - `401 Unauthorized`: Task belongs to a different user
/// - `404 Not Found`: No task with this ID
pub async fn destroy(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
) -> ApiResult<StatusCode> {
    let task = ownership::resolve_task(&state.db, &auth, &task_id).await?;

    Task::delete_cascade(&state.db, task.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
