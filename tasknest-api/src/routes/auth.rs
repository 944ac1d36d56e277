/// Authentication endpoint
///
/// Issues identity tokens in exchange for email/password credentials.
///
/// # Endpoints
///
/// - `POST /login` - Login and get a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::extract::{Json, State};
use serde::Deserialize;
use tasknest_shared::{
    auth::{jwt, password},
    models::user::User,
};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login endpoint
///
/// Authenticates a user and returns a signed identity token as a plain
/// text body. Unknown email and wrong password produce the same 401 so
/// the response never reveals whether an account exists.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Response
///
/// ```text
/// eyJhbGciOiJIUzI1NiIs...
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed email
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<String> {
    req.validate()
        .map_err(|_| ApiError::Validation("Invalid email format".to_string()))?;

    // Find user by email
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    // Verify password
    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    // Generate token
    let claims = jwt::Claims::new(user.id, &user.username, &user.email);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(token)
}
