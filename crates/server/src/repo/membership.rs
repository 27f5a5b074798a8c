use shared_types::{AppError, Role};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Does a record with this email exist in the role's collection?
pub async fn is_member(pool: &Pool<Postgres>, role: Role, email: &str) -> Result<bool, AppError> {
    // Table name comes from a closed enum, never from input.
    let sql = format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE LOWER(email) = LOWER($1))",
        role.collection()
    );
    sqlx::query_scalar::<_, bool>(&sql)
        .bind(email.trim())
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
