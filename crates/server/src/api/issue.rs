use dioxus::prelude::*;
use shared_types::{
    CreateIssueRequest, ImageUploadRequest, ImageUploadResponse, IssueAction, IssueResponse,
    StatusFilter,
};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

/// Store one issue photo and return its public URL. Anonymous callers allowed.
#[cfg_attr(feature = "server", tracing::instrument(skip(data)))]
#[server]
pub async fn upload_issue_image(
    file_name: String,
    content_type: String,
    data: String,
) -> Result<ImageUploadResponse, ServerFnError> {
    let store = crate::storage::issue_images()
        .await
        .map_err(|e| e.into_server_fn_error())?;

    let req = ImageUploadRequest {
        file_name,
        content_type,
        data,
    };
    let millis = chrono::Utc::now().timestamp_millis();
    crate::storage::store_issue_image(store, &req, millis)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// File a new issue with status `new`. Signed-out reporters are recorded as
/// anonymous.
#[cfg_attr(feature = "server", tracing::instrument(skip(req), fields(category = ?req.category)))]
#[server]
pub async fn submit_issue(req: CreateIssueRequest) -> Result<IssueResponse, ServerFnError> {
    use shared_types::ANONYMOUS_REPORTER;

    req.validate_request().map_err(|e| e.into_server_fn_error())?;
    req.check().map_err(|e| e.into_server_fn_error())?;

    let (reporter_id, reporter_email) = match current_claims() {
        Some(claims) => (claims.sub.to_string(), claims.email),
        None => (ANONYMOUS_REPORTER.to_string(), ANONYMOUS_REPORTER.to_string()),
    };

    let db = get_db().await;
    let issue = crate::repo::issue::create(db, &req, &reporter_id, &reporter_email)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(issue_id = %issue.id, "Issue reported");
    Ok(IssueResponse::from(issue))
}

/// Dashboard listing, newest first. NGO members only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_issues(filter: StatusFilter) -> Result<Vec<IssueResponse>, ServerFnError> {
    require_ngo().await?;

    let db = get_db().await;
    let issues = crate::repo::issue::list(db, filter.status())
        .await
        .map_err(|e| e.into_server_fn_error())?;

    Ok(issues.into_iter().map(IssueResponse::from).collect())
}

/// Apply a triage action and record the acting NGO. NGO members only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_issue_status(
    id: String,
    action: IssueAction,
) -> Result<IssueResponse, ServerFnError> {
    use shared_types::AppError;

    let (_, ngo) = require_ngo().await?;
    let issue_id = uuid::Uuid::parse_str(&id)
        .map_err(|_| AppError::bad_request("Invalid issue id").into_server_fn_error())?;

    let db = get_db().await;
    let issue = crate::repo::issue::update_status(db, issue_id, action, &ngo)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(issue_id = %issue.id, status = %issue.status, ngo = %ngo.org_name, "Issue status changed");
    Ok(IssueResponse::from(issue))
}
