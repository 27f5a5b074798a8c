use chrono::{DateTime, Utc};
use shared_types::AppError;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Persist the hash of a freshly issued refresh token.
pub async fn store(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO refresh_tokens (account_id, token_hash, expires_at) VALUES ($1, $2, $3)",
    )
    .bind(account_id)
    .bind(token_hash)
    .bind(expires_at)
    .execute(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Revoke a live token in one step. Returns false when the hash is unknown,
/// already revoked, expired, or belongs to another account, so a token can
/// be exchanged at most once.
pub async fn consume(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    token_hash: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET revoked = TRUE
        WHERE token_hash = $1 AND account_id = $2 AND revoked = FALSE AND expires_at > NOW()
        "#,
    )
    .bind(token_hash)
    .bind(account_id)
    .execute(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() == 1)
}

/// Whether the token is still usable, without consuming it.
pub async fn is_live(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    token_hash: &str,
) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM refresh_tokens
            WHERE token_hash = $1 AND account_id = $2 AND revoked = FALSE AND expires_at > NOW()
        )
        "#,
    )
    .bind(token_hash)
    .bind(account_id)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Revoke every outstanding token for the account (sign-out).
pub async fn revoke_all(pool: &Pool<Postgres>, account_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query(
        "UPDATE refresh_tokens SET revoked = TRUE WHERE account_id = $1 AND revoked = FALSE",
    )
    .bind(account_id)
    .execute(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected())
}
