/// Task model and database operations
///
/// This module provides the Task model. A task is owned by exactly one user;
/// the owner reference is set at creation from the authenticated identity and
/// is never client-mutable. Deleting a task cascades to its notes in a single
/// transaction.
///
/// A task's ordered note list is derived from `notes.task_id` rather than
/// stored on the task row, so appending a note is a single atomic insert and
/// concurrent appends cannot lose entries.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('a', 'b', 'c');
/// CREATE TYPE task_status AS ENUM ('incomplete', 'in progress', 'completed', 'forwarded');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id),
///     description TEXT NOT NULL,
///     priority task_priority NOT NULL,
///     status task_status NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: Uuid::new_v4(),
///     description: "Buy milk".to_string(),
///     priority: TaskPriority::A,
///     status: TaskStatus::Incomplete,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::note::Note;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Highest priority
    A,

    /// Medium priority
    B,

    /// Lowest priority
    C,
}

impl TaskPriority {
    /// Parses a priority from its wire representation
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "a" => Some(TaskPriority::A),
            "b" => Some(TaskPriority::B),
            "c" => Some(TaskPriority::C),
            _ => None,
        }
    }

    /// Gets priority as its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::A => "a",
            TaskPriority::B => "b",
            TaskPriority::C => "c",
        }
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not yet started
    Incomplete,

    /// Currently being worked on
    #[sqlx(rename = "in progress")]
    #[serde(rename = "in progress")]
    InProgress,

    /// Finished
    Completed,

    /// Handed off to someone else
    Forwarded,
}

impl TaskStatus {
    /// Parses a status from its wire representation
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "incomplete" => Some(TaskStatus::Incomplete),
            "in progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "forwarded" => Some(TaskStatus::Forwarded),
            _ => None,
        }
    }

    /// Gets status as its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "incomplete",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Forwarded => "forwarded",
        }
    }
}

/// Task model representing a user-owned task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user; immutable once set
    pub user_id: Uuid,

    /// What needs doing (non-blank)
    pub description: String,

    /// Task priority
    pub priority: TaskPriority,

    /// Task status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// A task together with its ordered notes, as returned by reads
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithNotes {
    /// The task itself
    #[serde(flatten)]
    pub task: Task,

    /// Notes attached to the task, oldest first
    pub notes: Vec<Note>,
}

/// Input for creating a new task
///
/// The owning user comes from the authenticated identity, never from the
/// client payload.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user
    pub user_id: Uuid,

    /// Task description
    pub description: String,

    /// Task priority
    pub priority: TaskPriority,

    /// Task status
    pub status: TaskStatus,
}

/// Input for updating an existing task
///
/// Only description, priority, and status are client-mutable. All fields are
/// optional; only `Some` fields are updated.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New status
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Creates a new task in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or the owning user
    /// doesn't exist (foreign key violation)
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, description, priority, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, description, priority, status, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// # Returns
    ///
    /// The task if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, description, priority, status, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Loads a task's ordered note list
    pub async fn with_notes(self, pool: &PgPool) -> Result<TaskWithNotes, sqlx::Error> {
        let notes = Note::list_by_task(pool, self.id).await?;
        Ok(TaskWithNotes { task: self, notes })
    }

    /// Lists all tasks owned by a user, notes populated
    ///
    /// Tasks are ordered by creation date (oldest first); each task's notes
    /// are fetched in one query and grouped in memory.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TaskWithNotes>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, description, priority, status, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let task_ids: Vec<Uuid> = tasks.iter().map(|t| t.id).collect();
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, task_id, content, created_at, updated_at
            FROM notes
            WHERE task_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(&task_ids)
        .fetch_all(pool)
        .await?;

        let mut notes_by_task: HashMap<Uuid, Vec<Note>> = HashMap::new();
        for note in notes {
            notes_by_task.entry(note.task_id).or_default().push(note);
        }

        Ok(tasks
            .into_iter()
            .map(|task| {
                let notes = notes_by_task.remove(&task.id).unwrap_or_default();
                TaskWithNotes { task, notes }
            })
            .collect())
    }

    /// Updates an existing task
    ///
    /// Only `Some` fields in `data` are updated; the owning user and note
    /// list cannot be touched through this path. The `updated_at` timestamp
    /// is set to the current time.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, user_id, description, priority, status, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task and all of its notes
    ///
    /// Runs in a single transaction: child notes first, then the task.
    /// Either both deletes commit or neither does.
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if the task didn't exist
    pub async fn delete_cascade(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM notes WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse_and_as_str() {
        for value in ["a", "b", "c"] {
            let priority = TaskPriority::parse(value).expect("valid priority");
            assert_eq!(priority.as_str(), value);
        }

        assert!(TaskPriority::parse("d").is_none());
        assert!(TaskPriority::parse("A").is_none());
    }

    #[test]
    fn test_status_parse_and_as_str() {
        for value in ["incomplete", "in progress", "completed", "forwarded"] {
            let status = TaskStatus::parse(value).expect("valid status");
            assert_eq!(status.as_str(), value);
        }

        assert!(TaskStatus::parse("done").is_none());
        assert!(TaskStatus::parse("in_progress").is_none());
    }

    #[test]
    fn test_status_serde_wire_format() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, r#""in progress""#);

        let status: TaskStatus = serde_json::from_str(r#""in progress""#).unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }

    #[test]
    fn test_task_with_notes_serializes_flat() {
        let task = Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: "Buy milk".to_string(),
            priority: TaskPriority::A,
            status: TaskStatus::Incomplete,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let with_notes = TaskWithNotes {
            task,
            notes: vec![],
        };

        let value = serde_json::to_value(&with_notes).unwrap();
        assert_eq!(value["description"], "Buy milk");
        assert_eq!(value["priority"], "a");
        assert_eq!(value["status"], "incomplete");
        assert!(value["notes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_update_task_default() {
        let update = UpdateTask::default();
        assert!(update.description.is_none());
        assert!(update.priority.is_none());
        assert!(update.status.is_none());
    }
}
