use shared_types::{AppError, ContactMessage, CreateContactRequest};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

pub async fn create(
    pool: &Pool<Postgres>,
    req: &CreateContactRequest,
) -> Result<ContactMessage, AppError> {
    sqlx::query_as::<_, ContactMessage>(
        r#"
        INSERT INTO contact_messages (name, email, subject, message)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, subject, message, created_at
        "#,
    )
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(req.subject.trim())
    .bind(req.message.trim())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
