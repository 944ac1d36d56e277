/// Per-resource access control
///
/// Every resource in Tasknest is reached through an owning user: users own
/// themselves, tasks carry an owner reference, and notes inherit ownership
/// from their parent task. The resolvers here run before any entity service
/// logic and follow the same three steps:
///
/// 1. Parse the path identifier; malformed → `InvalidIdentifier` (400)
/// 2. Load the resource; absent → `NotFound` (404)
/// 3. Compare the owner to the requester; mismatch → `Unauthorized` (401)
///
/// On success the resolved entity is returned to the handler, so downstream
/// read/update/destroy logic never re-fetches or re-checks.
///
/// # Example
///
/// ```no_run
/// use tasknest_api::ownership;
/// use tasknest_shared::auth::middleware::AuthContext;
/// use sqlx::PgPool;
///
/// # async fn example(db: PgPool, auth: AuthContext) -> Result<(), tasknest_api::error::ApiError> {
/// let task = ownership::resolve_task(&db, &auth, "5f3c1a...").await?;
/// assert_eq!(task.user_id, auth.user_id);
/// # Ok(())
/// # }
/// ```

use crate::error::ApiError;
use sqlx::PgPool;
use tasknest_shared::{
    auth::middleware::AuthContext,
    models::{note::Note, task::Task, user::User},
};
use uuid::Uuid;

/// Parses a path identifier into a UUID
///
/// # Errors
///
/// Returns `ApiError::InvalidIdentifier` (400) on malformed input
pub fn parse_id(id: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::InvalidIdentifier(format!("{} ID is invalid.", what)))
}

/// Resolves the addressed user, enforcing that the requester is that user
///
/// Users may only read, update, or destroy themselves.
///
/// # Errors
///
/// - `InvalidIdentifier` if the ID is malformed
/// - `NotFound` if no user has this ID
/// - `Unauthorized` if the requester is a different user
pub async fn resolve_user(
    pool: &PgPool,
    auth: &AuthContext,
    user_id: &str,
) -> Result<User, ApiError> {
    let id = parse_id(user_id, "User")?;

    let user = User::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user associated with this ID was found.".to_string()))?;

    if user.id != auth.user_id {
        return Err(ApiError::Unauthorized("Unauthorized access.".to_string()));
    }

    Ok(user)
}

/// Resolves the addressed task, enforcing that the requester owns it
///
/// # Errors
///
/// - `InvalidIdentifier` if the ID is malformed
/// - `NotFound` if no task has this ID
/// - `Unauthorized` if the task belongs to another user
pub async fn resolve_task(
    pool: &PgPool,
    auth: &AuthContext,
    task_id: &str,
) -> Result<Task, ApiError> {
    let id = parse_id(task_id, "Task")?;

    let task = Task::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No task associated with that ID was found.".to_string()))?;

    if task.user_id != auth.user_id {
        return Err(ApiError::Unauthorized("Unauthorized access.".to_string()));
    }

    Ok(task)
}

/// Resolves the addressed note through its parent task
///
/// A note has no owner field of its own; authorization is transitive through
/// the parent task's owner, so the task is resolved (and authorized) first.
/// The note must actually belong to the task named in the path.
///
/// # Errors
///
/// - `InvalidIdentifier` if either ID is malformed
/// - `NotFound` if the task or note is absent, or the note belongs to a
///   different task
/// - `Unauthorized` if the parent task belongs to another user
pub async fn resolve_note(
    pool: &PgPool,
    auth: &AuthContext,
    task_id: &str,
    note_id: &str,
) -> Result<(Task, Note), ApiError> {
    let task = resolve_task(pool, auth, task_id).await?;

    let id = parse_id(note_id, "Note")?;

    let note = Note::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No note associated with this ID was found.".to_string()))?;

    if note.task_id != task.id {
        return Err(ApiError::NotFound(
            "No note associated with this ID was found.".to_string(),
        ));
    }

    Ok((task, note))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_valid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Task").unwrap(), id);
    }

    #[test]
    fn test_parse_id_malformed() {
        let err = parse_id("not-a-uuid", "Task").unwrap_err();
        assert!(matches!(err, ApiError::InvalidIdentifier(_)));
        assert_eq!(err.to_string(), "Invalid identifier: Task ID is invalid.");
    }
}
