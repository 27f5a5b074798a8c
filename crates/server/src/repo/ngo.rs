use shared_types::{AppError, NewNgo, NgoProfile};
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = "id, org_name, email, registration_number, phone, address, website, description, created_at";

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    account_id: Uuid,
    ngo: &NewNgo,
) -> Result<NgoProfile, AppError> {
    sqlx::query_as::<_, NgoProfile>(&format!(
        r#"
        INSERT INTO ngos (id, org_name, email, registration_number, phone, address, website, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(account_id)
    .bind(ngo.org_name.trim())
    .bind(ngo.email.trim())
    .bind(&ngo.registration_number)
    .bind(&ngo.phone)
    .bind(&ngo.address)
    .bind(&ngo.website)
    .bind(&ngo.description)
    .fetch_one(executor)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Case-insensitive lookup; this is the NGO authorization check.
pub async fn find_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<NgoProfile>, AppError> {
    sqlx::query_as::<_, NgoProfile>(&format!(
        "SELECT {COLUMNS} FROM ngos WHERE LOWER(email) = LOWER($1)"
    ))
    .bind(email.trim())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// All partners, alphabetically.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<NgoProfile>, AppError> {
    sqlx::query_as::<_, NgoProfile>(&format!(
        "SELECT {COLUMNS} FROM ngos ORDER BY LOWER(org_name) ASC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
