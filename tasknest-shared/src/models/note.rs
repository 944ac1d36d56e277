/// Note model and database operations
///
/// This module provides the Note model. A note always references exactly one
/// task; it has no owner field of its own and inherits authorization from the
/// parent task's owner. The parent->children relation is held solely by
/// `notes.task_id`, so appending to a task's note list is a single atomic
/// insert and concurrent appends under the same task cannot lose entries.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     task_id UUID NOT NULL REFERENCES tasks(id),
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::note::{CreateNote, Note};
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(task_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let note = Note::create(&pool, CreateNote {
///     task_id,
///     content: "Remember the oat milk".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Note model representing a note attached to a task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note ID
    pub id: Uuid,

    /// Parent task
    pub task_id: Uuid,

    /// Note content (non-blank)
    pub content: String,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new note
#[derive(Debug, Clone)]
pub struct CreateNote {
    /// Parent task
    pub task_id: Uuid,

    /// Note content
    pub content: String,
}

/// Input for updating an existing note
///
/// All fields are optional; only `Some` fields are updated. Setting
/// `task_id` re-parents the note, which implicitly removes it from the old
/// parent's derived note list.
#[derive(Debug, Clone, Default)]
pub struct UpdateNote {
    /// New content
    pub content: Option<String>,

    /// New parent task
    pub task_id: Option<Uuid>,
}

impl Note {
    /// Creates a new note under a task
    ///
    /// This is the atomic "append to the task's note list" operation: the
    /// insert either happens completely or not at all, and the derived list
    /// needs no second update step.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or the parent task
    /// doesn't exist (foreign key violation)
    pub async fn create(pool: &PgPool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (task_id, content)
            VALUES ($1, $2)
            RETURNING id, task_id, content, created_at, updated_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by ID
    ///
    /// # Returns
    ///
    /// The note if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, task_id, content, created_at, updated_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Lists a task's notes, oldest first
    pub async fn list_by_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, task_id, content, created_at, updated_at
            FROM notes
            WHERE task_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Updates an existing note
    ///
    /// Only `Some` fields in `data` are updated. The `updated_at` timestamp
    /// is set to the current time.
    ///
    /// # Returns
    ///
    /// The updated note if found, None if the note doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE notes SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.content.is_some() {
            bind_count += 1;
            query.push_str(&format!(", content = ${}", bind_count));
        }
        if data.task_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", task_id = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, task_id, content, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Note>(&query).bind(id);

        if let Some(content) = data.content {
            q = q.bind(content);
        }
        if let Some(task_id) = data.task_id {
            q = q.bind(task_id);
        }

        let note = q.fetch_optional(pool).await?;

        Ok(note)
    }

    /// Deletes a note by ID
    ///
    /// A single delete also removes the note from its parent task's derived
    /// note list; there is no separate unlink step to fail halfway.
    ///
    /// # Returns
    ///
    /// True if the note was deleted, false if the note didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
