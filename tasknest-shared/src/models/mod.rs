/// Database models for Tasknest
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts; deleting a user cascades to its tasks and notes
/// - `task`: Tasks owned by a user; deleting a task cascades to its notes
/// - `note`: Notes attached to a task
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::user::{CreateUser, User};
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod note;
pub mod task;
pub mod user;
