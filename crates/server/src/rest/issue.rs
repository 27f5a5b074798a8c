use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{
    AppError, CreateIssueRequest, ImageUploadRequest, ImageUploadResponse, IssueListParams,
    IssueResponse, StatusFilter, UpdateIssueStatusRequest, ANONYMOUS_REPORTER,
};

use crate::auth::extractors::{MaybeAuth, NgoMember};
use crate::error_convert::ValidateRequest;

fn parse_issue_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request(format!("Invalid issue id: {}", id)))
}

// ---------------------------------------------------------------------------
// POST /api/issues
// ---------------------------------------------------------------------------

/// Report an issue. Signed-out callers are recorded as anonymous.
#[utoipa::path(
    post,
    path = "/api/issues",
    request_body = CreateIssueRequest,
    responses(
        (status = 201, description = "Issue reported", body = IssueResponse),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "issues"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn create_issue(
    State(pool): State<Pool<Postgres>>,
    auth: MaybeAuth,
    Json(body): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<IssueResponse>), AppError> {
    body.validate_request()?;
    body.check()?;

    let (reporter_id, reporter_email) = match auth.0 {
        Some(claims) => (claims.sub.to_string(), claims.email),
        None => (ANONYMOUS_REPORTER.to_string(), ANONYMOUS_REPORTER.to_string()),
    };

    let issue = crate::repo::issue::create(&pool, &body, &reporter_id, &reporter_email).await?;
    tracing::info!(issue_id = %issue.id, "Issue reported");

    Ok((StatusCode::CREATED, Json(IssueResponse::from(issue))))
}

// ---------------------------------------------------------------------------
// GET /api/issues
// ---------------------------------------------------------------------------

/// Triage listing, newest first.
#[utoipa::path(
    get,
    path = "/api/issues",
    params(IssueListParams),
    responses(
        (status = 200, description = "Issues", body = Vec<IssueResponse>),
        (status = 400, description = "Unknown status filter", body = AppError),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Not an NGO member", body = AppError)
    ),
    tag = "issues",
    security(("bearer_auth" = []))
)]
pub async fn list_issues(
    State(pool): State<Pool<Postgres>>,
    _ngo: NgoMember,
    Query(params): Query<IssueListParams>,
) -> Result<Json<Vec<IssueResponse>>, AppError> {
    let filter: StatusFilter = params.status.as_deref().unwrap_or("all").parse()?;

    let issues = crate::repo::issue::list(&pool, filter.status()).await?;
    Ok(Json(issues.into_iter().map(IssueResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/issues/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/issues/{id}",
    params(("id" = String, Path, description = "Issue UUID")),
    responses(
        (status = 200, description = "Issue detail", body = IssueResponse),
        (status = 403, description = "Not an NGO member", body = AppError),
        (status = 404, description = "Issue not found", body = AppError)
    ),
    tag = "issues",
    security(("bearer_auth" = []))
)]
pub async fn get_issue(
    State(pool): State<Pool<Postgres>>,
    _ngo: NgoMember,
    Path(id): Path<String>,
) -> Result<Json<IssueResponse>, AppError> {
    let id = parse_issue_id(&id)?;
    crate::repo::issue::find_by_id(&pool, id)
        .await?
        .map(|i| Json(IssueResponse::from(i)))
        .ok_or_else(|| AppError::not_found(format!("Issue {} not found", id)))
}

// ---------------------------------------------------------------------------
// PATCH /api/issues/{id}/status
// ---------------------------------------------------------------------------

/// Apply a triage action and record the acting NGO.
#[utoipa::path(
    patch,
    path = "/api/issues/{id}/status",
    params(("id" = String, Path, description = "Issue UUID")),
    request_body = UpdateIssueStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = IssueResponse),
        (status = 403, description = "Not an NGO member", body = AppError),
        (status = 404, description = "Issue not found", body = AppError),
        (status = 409, description = "Transition not allowed from the current status", body = AppError)
    ),
    tag = "issues",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(pool, member, body), fields(action = ?body.action))]
pub async fn update_issue_status(
    State(pool): State<Pool<Postgres>>,
    member: NgoMember,
    Path(id): Path<String>,
    Json(body): Json<UpdateIssueStatusRequest>,
) -> Result<Json<IssueResponse>, AppError> {
    let id = parse_issue_id(&id)?;
    let issue = crate::repo::issue::update_status(&pool, id, body.action, &member.ngo).await?;

    tracing::info!(issue_id = %issue.id, status = %issue.status, ngo = %member.ngo.org_name, "Issue status changed");
    Ok(Json(IssueResponse::from(issue)))
}

// ---------------------------------------------------------------------------
// POST /api/issues/images
// ---------------------------------------------------------------------------

/// Store one base64-encoded issue photo.
#[utoipa::path(
    post,
    path = "/api/issues/images",
    request_body = ImageUploadRequest,
    responses(
        (status = 201, description = "Image stored", body = ImageUploadResponse),
        (status = 400, description = "Unsupported or oversized image", body = AppError),
        (status = 502, description = "Storage disabled or unavailable", body = AppError)
    ),
    tag = "issues"
)]
#[tracing::instrument(skip(body), fields(file_name = %body.file_name))]
pub async fn upload_issue_image(
    Json(body): Json<ImageUploadRequest>,
) -> Result<(StatusCode, Json<ImageUploadResponse>), AppError> {
    let store = crate::storage::issue_images().await?;
    let millis = chrono::Utc::now().timestamp_millis();
    let uploaded = crate::storage::store_issue_image(store, &body, millis).await?;

    Ok((StatusCode::CREATED, Json(uploaded)))
}
