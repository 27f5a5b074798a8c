use chrono::{NaiveDateTime, Utc};
use shared_types::{AppError, CreateDonationRequest, Donation};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str =
    "id, food_type, quantity, location, pickup_at, description, direction, created_at";

pub async fn create(
    pool: &Pool<Postgres>,
    req: &CreateDonationRequest,
    pickup_at: NaiveDateTime,
) -> Result<Donation, AppError> {
    let description = req
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    sqlx::query_as::<_, Donation>(&format!(
        r#"
        INSERT INTO donations
            (food_type, quantity, location, pickup_at, description, direction, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(req.food_type.as_str())
    .bind(req.quantity)
    .bind(req.location.trim())
    .bind(pickup_at)
    .bind(description)
    .bind(req.direction.as_str())
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Every donation in storage order.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<Donation>, AppError> {
    sqlx::query_as::<_, Donation>(&format!("SELECT {COLUMNS} FROM donations"))
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
