use chrono::{DateTime, Utc};
use shared_types::{AppError, Role};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Citizen profile, keyed by the account id.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    account_id: Uuid,
    name: &str,
    email: &str,
) -> Result<UserProfile, AppError> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO users (id, name, email, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, role, created_at
        "#,
    )
    .bind(account_id)
    .bind(name.trim())
    .bind(email.trim())
    .bind(Role::User.as_str())
    .fetch_one(executor)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
