/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and migrations
/// - Test user seeding and token issuance
/// - A router wired to the test database
///
/// The tests need a live PostgreSQL instance reachable via `DATABASE_URL`.
/// Every context seeds its own uniquely-named user and cleans up after
/// itself, so tests can run in parallel against one database.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tasknest_api::app::{build_router, AppState};
use tasknest_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use tasknest_shared::auth::jwt::{create_token, Claims};
use tasknest_shared::auth::password::hash_password;
use tasknest_shared::db::migrations::run_migrations;
use tasknest_shared::models::user::{CreateUser, User};
use uuid::Uuid;

/// Signing secret shared by the test router and seeded tokens
pub const TEST_SECRET: &str = "integration-test-secret-32-bytes!!";

/// Plaintext password of every seeded user
pub const TEST_PASSWORD: &str = "longenough1";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must point at a test database"))?;

        let db = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        run_migrations(&db).await?;

        let user = seed_user(&db).await?;
        let claims = Claims::new(user.id, &user.username, &user.email);
        let token = create_token(&claims, TEST_SECRET)?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                request_timeout_seconds: 30,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self {
            db,
            app,
            user,
            token,
        })
    }

    /// Returns the Authorization header value for the seeded user
    pub fn auth_header(&self) -> String {
        self.token.clone()
    }

    /// Removes the seeded user and everything it owns
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete_cascade(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Seeds a user with a unique username and email
pub async fn seed_user(db: &PgPool) -> anyhow::Result<User> {
    let suffix = Uuid::new_v4();

    let user = User::create(
        db,
        CreateUser {
            username: format!("user-{}", suffix),
            email: format!("user-{}@example.com", suffix),
            password_hash: hash_password(TEST_PASSWORD)?,
        },
    )
    .await?;

    Ok(user)
}

/// Reads a response body as JSON
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
