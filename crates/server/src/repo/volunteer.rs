use shared_types::{AppError, CreateVolunteerRequest, Volunteer};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

pub async fn create(
    pool: &Pool<Postgres>,
    req: &CreateVolunteerRequest,
) -> Result<Volunteer, AppError> {
    let experience = req
        .experience
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    sqlx::query_as::<_, Volunteer>(
        r#"
        INSERT INTO volunteers (name, email, phone, interests, availability, experience)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, email, phone, interests, availability, experience, created_at
        "#,
    )
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(req.phone.trim())
    .bind(&req.interests)
    .bind(&req.availability)
    .bind(experience)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
