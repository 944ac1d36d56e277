/// Note endpoints
///
/// Notes live under a parent task and carry no owner of their own;
/// authorization is transitive through the parent task's owner. Every route
/// here resolves (and authorizes) the parent task named in the path before
/// touching the note.
///
/// # Endpoints
///
/// - `POST /tasks/:task_id/notes` - Append a note to an owned task
/// - `GET /tasks/:task_id/notes/:note_id` - Read a note
/// - `PUT /tasks/:task_id/notes/:note_id` - Update a note (partial)
/// - `DELETE /tasks/:task_id/notes/:note_id` - Delete a note

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
    models::note::{CreateNote, Note, UpdateNote},
    validation,
};

/// Note create / update request body
#[derive(Debug, Deserialize)]
pub struct NotePayload {
    /// Note content
    pub content: Option<String>,

    /// New parent task ID (update only; re-parents the note)
    pub task: Option<String>,
}

/// Append a note to an owned task
///
/// A single atomic insert; concurrent appends to the same task never lose
/// entries.
///
/// # Endpoint
///
/// ```text
/// POST /tasks/:task_id/notes
/// Content-Type: application/json
///
/// {
///   "content": "Remember the oat milk"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed task ID or blank content
/// - `401 Unauthorized`: Task belongs to a different user
/// - `404 Not Found`: No task with this ID
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
    Json(req): Json<NotePayload>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let task = ownership::resolve_task(&state.db, &auth, &task_id).await?;

    validation::validate_note(req.content.as_deref())
        .map_err(|msg| ApiError::Validation(msg.to_string()))?;

    let note = Note::create(
        &state.db,
        CreateNote {
            task_id: task.id,
            content: req.content.unwrap_or_default(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Read a note under an owned task
///
/// # Errors
///
/// - `400 Bad Request`: Malformed task or note ID
/// - `401 Unauthorized`: Parent task belongs to a different user
/// - `404 Not Found`: Task or note absent, or note under a different task
pub async fn read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((task_id, note_id)): Path<(String, String)>,
) -> ApiResult<Json<Note>> {
    let (_, note) = ownership::resolve_note(&state.db, &auth, &task_id, &note_id).await?;

    Ok(Json(note))
}

/// Update a note
///
/// Content is required. Supplying `task` re-parents the note onto another
/// task the requester owns; the destination is resolved with the same
/// ownership checks as the source, and the move is a single column update
/// that also drops the note from the old parent's derived list.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed ID or blank content
/// - `401 Unauthorized`: Source or destination task belongs to a different user
/// - `404 Not Found`: Task or note absent, or note under a different task
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((task_id, note_id)): Path<(String, String)>,
    Json(req): Json<NotePayload>,
) -> ApiResult<Json<Note>> {
    let (_, note) = ownership::resolve_note(&state.db, &auth, &task_id, &note_id).await?;

    validation::validate_note(req.content.as_deref())
        .map_err(|msg| ApiError::Validation(msg.to_string()))?;

    // Re-parenting requires ownership of the destination task too
    let new_task_id = match req.task.as_deref() {
        Some(dest) => Some(ownership::resolve_task(&state.db, &auth, dest).await?.id),
        None => None,
    };

    let updated = Note::update(
        &state.db,
        note.id,
        UpdateNote {
            content: req.content,
            task_id: new_task_id,
        },
    )
    .await?
    .ok_or_else(|| {
        ApiError::NotFound("No note associated with this ID was found.".to_string())
    })?;

    Ok(Json(updated))
}

/// Delete a note under an owned task
///
/// # Errors
///
/// - `400 Bad Request`: Malformed task or note ID
/// - `401 Unauthorized`: Parent task belongs to a different user
/// - `404 Not Found`: Task or note absent, or note under a different task
pub async fn destroy(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((task_id, note_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let (_, note) = ownership::resolve_note(&state.db, &auth, &task_id, &note_id).await?;

    Note::delete(&state.db, note.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
