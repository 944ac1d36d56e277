/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasknest_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tasknest_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tasknest_shared::auth::middleware::{auth_middleware, AuthError};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning; everything inside is read-only
/// after startup apart from the connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                              # Health check (public)
/// ├── POST /users                               # Register (public)
/// ├── POST /login                               # Login (public)
/// ├── GET/PUT/DELETE /users/:user_id            # Self only (authenticated)
/// ├── POST/GET /tasks                           # Create / list own (authenticated)
/// ├── GET/PUT/DELETE /tasks/:task_id            # Owner only (authenticated)
/// ├── POST /tasks/:task_id/notes                # Owner of task (authenticated)
/// └── GET/PUT/DELETE /tasks/:task_id/notes/:note_id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Request timeout (tower-http TimeoutLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: registration, login, health. Everything else requires
    // a valid identity token.
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/users", post(routes::users::create))
        .route("/login", post(routes::auth::login));

    let protected_routes = Router::new()
        .route(
            "/users/:user_id",
            get(routes::users::read)
                .put(routes::users::update)
                .delete(routes::users::destroy),
        )
        .route(
            "/tasks",
            post(routes::tasks::create).get(routes::tasks::read_all),
        )
        .route(
            "/tasks/:task_id",
            get(routes::tasks::read)
                .put(routes::tasks::update)
                .delete(routes::tasks::destroy),
        )
        .route("/tasks/:task_id/notes", post(routes::notes::create))
        .route(
            "/tasks/:task_id/notes/:note_id",
            get(routes::notes::read)
                .put(routes::notes::update)
                .delete(routes::notes::destroy),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.api.request_timeout_seconds,
        )))
        .with_state(state)
}

/// Identity-token authentication middleware layer
///
/// Thin adapter that hands the configured signing secret to the shared
/// authentication middleware.
async fn auth_layer(
    axum::extract::State(state): axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    auth_middleware(state.config.jwt.secret.clone(), req, next).await
}
