use chrono::{DateTime, Utc};
use shared_types::{AppError, AuthUser};
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Identity record. Never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a new account. A duplicate email surfaces as a Conflict.
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
    password_hash: &str,
) -> Result<Account, AppError> {
    sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (email, password_hash)
        VALUES ($1, $2)
        RETURNING id, email, password_hash, created_at
        "#,
    )
    .bind(email.trim())
    .bind(password_hash)
    .fetch_one(executor)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Case-insensitive lookup by email.
pub async fn find_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<Account>, AppError> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM accounts
        WHERE LOWER(email) = LOWER($1)
        "#,
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Client-facing identity. The display name comes from whichever role
/// profile exists, falling back to the email.
pub async fn find_auth_user(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<AuthUser>, AppError> {
    let row: Option<(Uuid, String, String)> = sqlx::query_as(
        r#"
        SELECT a.id, a.email, COALESCE(u.name, n.org_name, a.email) AS name
        FROM accounts a
        LEFT JOIN users u ON u.id = a.id
        LEFT JOIN ngos n ON n.id = a.id
        WHERE a.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row.map(|(id, email, name)| AuthUser { id, name, email }))
}
