/// API route handlers
///
/// This module contains all HTTP route handlers for the Tasknest API:
///
/// - `health`: Health check endpoint
/// - `auth`: Login endpoint (token issuance)
/// - `users`: User registration and self-service account management
/// - `tasks`: Task CRUD scoped to the owning user
/// - `notes`: Note CRUD nested under the parent task

pub mod auth;
pub mod health;
pub mod notes;
pub mod tasks;
pub mod users;
