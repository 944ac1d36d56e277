/// User endpoints
///
/// Registration is the only public write in the API; everything else on a
/// user requires a token for that same user. A user may read, update, and
/// destroy only themselves.
///
/// # Endpoints
///
/// - `POST /users` - Register a new user (public)
/// - `GET /users/:user_id` - Read own account
/// - `PUT /users/:user_id` - Update own account (partial)
/// - `DELETE /users/:user_id` - Destroy own account and everything it owns

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
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasknest_shared::{
    auth::{middleware::AuthContext, password},
    models::user::{CreateUser, UpdateUser, User},
    validation,
};
use uuid::Uuid;

/// Registration / update request body
///
/// Fields are optional at the type level so the validation layer can report
/// the precise missing-field rule instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    /// Username (must be unique)
    pub username: Option<String>,

    /// Email address (must be unique)
    pub email: Option<String>,

    /// Plaintext password, hashed before storage
    pub password: Option<String>,
}

/// User as returned to clients
///
/// Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Username or email already exists
/// - `500 Internal Server Error`: Server error
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<UserPayload>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    validation::validate_user(
        req.username.as_deref(),
        req.email.as_deref(),
        req.password.as_deref(),
        false,
    )
    .map_err(|msg| ApiError::Validation(msg.to_string()))?;

    // Validation guarantees all three fields are present past this point
    let password_hash = password::hash_password(req.password.as_deref().unwrap_or_default())?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password_hash,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Read own account
///
/// # Errors
///
/// - `400 Bad Request`: Malformed user ID
/// - `401 Unauthorized`: Token belongs to a different user
/// - `404 Not Found`: No user with this ID
pub async fn read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = ownership::resolve_user(&state.db, &auth, &user_id).await?;

    Ok(Json(user.into()))
}

/// Update own account (partial)
///
/// Absent fields are left untouched. A supplied password is re-hashed only
/// when it meets the minimum length; shorter values are silently ignored.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed user ID or validation failed
/// - `401 Unauthorized`: Token belongs to a different user
/// - `404 Not Found`: No user with this ID
/// - `409 Conflict`: New username or email already taken
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<String>,
    Json(req): Json<UserPayload>,
) -> ApiResult<Json<UserResponse>> {
    let current = ownership::resolve_user(&state.db, &auth, &user_id).await?;

    // Validate the account as it would look after the update
    validation::validate_user(
        req.username.as_deref().or(Some(&current.username)),
        req.email.as_deref().or(Some(&current.email)),
        None,
        true,
    )
    .map_err(|msg| ApiError::Validation(msg.to_string()))?;

    let password_hash = match req.password.as_deref() {
        Some(p) if p.chars().count() >= validation::MIN_PASSWORD_LENGTH => {
            Some(password::hash_password(p)?)
        }
        _ => None,
    };

    let updated = User::update(
        &state.db,
        current.id,
        UpdateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| {
        ApiError::NotFound("No user associated with this ID was found.".to_string())
    })?;

    Ok(Json(updated.into()))
}

/// Destroy own account
///
/// Deletes the user together with all of their tasks and those tasks' notes
/// in a single transaction.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed user ID
/// - `401 Unauthorized`: Token belongs to a different user
/// - `404 Not Found`: No user with this ID
pub async fn destroy(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    let user = ownership::resolve_user(&state.db, &auth, &user_id).await?;

    User::delete_cascade(&state.db, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
