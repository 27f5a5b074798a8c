use shared_types::{AppError, CreateIssueRequest, Issue, IssueAction, IssueStatus, NgoProfile};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = r#"
    id, title, description, location, category, status, reporter_id, reporter_email,
    image_urls, contact_phone, created_at, updated_at,
    handled_by_ngo_id, handled_by_name, handled_by_email
"#;

/// Insert a new report. Status always starts at `new`.
pub async fn create(
    pool: &Pool<Postgres>,
    req: &CreateIssueRequest,
    reporter_id: &str,
    reporter_email: &str,
) -> Result<Issue, AppError> {
    sqlx::query_as::<_, Issue>(&format!(
        r#"
        INSERT INTO issues
            (title, description, location, category, status,
             reporter_id, reporter_email, image_urls, contact_phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(req.title.trim())
    .bind(req.description.trim())
    .bind(req.location.trim())
    .bind(req.category.as_str())
    .bind(IssueStatus::New.as_str())
    .bind(reporter_id)
    .bind(reporter_email)
    .bind(&req.image_urls)
    .bind(req.normalized_phone())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Issue>, AppError> {
    sqlx::query_as::<_, Issue>(&format!("SELECT {COLUMNS} FROM issues WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Newest first. `None` lists every status; legacy `pending` rows count as new.
pub async fn list(
    pool: &Pool<Postgres>,
    status: Option<IssueStatus>,
) -> Result<Vec<Issue>, AppError> {
    let stored: Option<Vec<String>> = status.map(|s| {
        s.stored_values().iter().map(|v| v.to_string()).collect()
    });

    sqlx::query_as::<_, Issue>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM issues
        WHERE ($1::text[] IS NULL OR status = ANY($1))
        ORDER BY created_at DESC
        "#
    ))
    .bind(stored)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Apply a triage action on behalf of `ngo`.
///
/// The update only matches rows still in the action's source state, so two
/// NGOs racing on the same issue cannot both win. A miss is resolved into
/// NotFound or the lifecycle Conflict for the row's actual state.
pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    action: IssueAction,
    ngo: &NgoProfile,
) -> Result<Issue, AppError> {
    let from: Vec<String> = action
        .from()
        .stored_values()
        .iter()
        .map(|v| v.to_string())
        .collect();

    let updated = sqlx::query_as::<_, Issue>(&format!(
        r#"
        UPDATE issues
        SET status = $1,
            updated_at = NOW(),
            handled_by_ngo_id = $2,
            handled_by_name = $3,
            handled_by_email = $4
        WHERE id = $5 AND status = ANY($6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(action.to().as_str())
    .bind(ngo.id)
    .bind(&ngo.org_name)
    .bind(&ngo.email)
    .bind(id)
    .bind(&from)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    if let Some(issue) = updated {
        return Ok(issue);
    }

    match find_by_id(pool, id).await? {
        None => Err(AppError::not_found(format!("Issue {} not found", id))),
        Some(current) => {
            let status = IssueStatus::from_stored(&current.status);
            // Someone else moved it between our read and write.
            status.apply(action)?;
            Err(AppError::conflict("Issue was updated by someone else. Please refresh."))
        }
    }
}
