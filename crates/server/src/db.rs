use axum::extract::FromRef;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::rate_limit::RateLimitState;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<Pool<Postgres>>` or
/// `State<RateLimitState>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub auth_limiter: RateLimitState,
}

impl AppState {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            auth_limiter: RateLimitState::for_auth(),
        }
    }
}

/// Pool created lazily; no connections are opened until the first query.
/// Each `#[tokio::test]` creates its own runtime, so binding to one at init
/// time would break the integration tests.
static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();
static MIGRATED: AtomicBool = AtomicBool::new(false);

/// Build a lazily connecting pool for `database_url`.
pub fn pool_for(database_url: &str) -> Result<Pool<Postgres>, sqlx::Error> {
    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(database_url)
}

/// Create the process-wide pool from `DATABASE_URL`.
pub fn create_pool() -> Pool<Postgres> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    pool_for(&database_url).expect("Failed to create database pool")
}

/// Run the embedded migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Get or initialize the database connection pool.
/// Migrations run once on the first call; subsequent calls return immediately.
///
/// Used by server functions, which share a single long-lived runtime.
/// REST handlers take `State<Pool<Postgres>>` from `AppState` instead.
pub async fn get_db() -> &'static Pool<Postgres> {
    let pool = POOL.get_or_init(create_pool);

    if !MIGRATED.swap(true, Ordering::SeqCst) {
        if let Err(e) = run_migrations(pool).await {
            tracing::error!(error = %e, "Database migrations failed");
            MIGRATED.store(false, Ordering::SeqCst);
        }
    }

    pool
}
