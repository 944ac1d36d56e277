/// Authentication utilities
///
/// This module provides the authentication primitives for Tasknest:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Identity token generation and validation
/// - [`middleware`]: Axum middleware extracting a verified identity
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with fixed cost parameters
/// - **Identity Tokens**: HS256 signing with a fixed 2-hour expiry
/// - **Constant-time Comparison**: Password verification is constant-time
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::auth::password::{hash_password, verify_password};
/// use tasknest_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Identity token issuance
/// let claims = Claims::new(Uuid::new_v4(), "alice", "alice@example.com");
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
