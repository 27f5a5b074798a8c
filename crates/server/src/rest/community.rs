use axum::{extract::State, http::StatusCode, Json};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, ContactMessageResponse, CreateContactRequest, CreateVolunteerRequest, ImpactStats,
    NgoResponse, VolunteerResponse,
};

use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// POST /api/volunteers
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/volunteers",
    request_body = CreateVolunteerRequest,
    responses(
        (status = 201, description = "Application received", body = VolunteerResponse),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "community"
)]
#[tracing::instrument(skip(pool, body))]
pub async fn create_volunteer(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateVolunteerRequest>,
) -> Result<(StatusCode, Json<VolunteerResponse>), AppError> {
    body.validate_request()?;
    body.check()?;

    let volunteer = crate::repo::volunteer::create(&pool, &body).await?;
    Ok((StatusCode::CREATED, Json(VolunteerResponse::from(volunteer))))
}

// ---------------------------------------------------------------------------
// POST /api/contact
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactMessageResponse),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "community"
)]
#[tracing::instrument(skip(pool, body))]
pub async fn create_contact_message(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactMessageResponse>), AppError> {
    body.validate_request()?;
    body.check()?;

    let message = crate::repo::contact::create(&pool, &body).await?;
    Ok((StatusCode::CREATED, Json(ContactMessageResponse::from(message))))
}

// ---------------------------------------------------------------------------
// GET /api/ngos
// ---------------------------------------------------------------------------

/// Partner organizations, alphabetically.
#[utoipa::path(
    get,
    path = "/api/ngos",
    responses(
        (status = 200, description = "NGO partners", body = Vec<NgoResponse>)
    ),
    tag = "community"
)]
pub async fn list_ngos(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<Vec<NgoResponse>>, AppError> {
    let ngos = crate::repo::ngo::list(&pool).await?;
    Ok(Json(ngos.into_iter().map(NgoResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/stats
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Impact statistics", body = ImpactStats)
    ),
    tag = "community"
)]
pub async fn impact_stats(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<ImpactStats>, AppError> {
    Ok(Json(crate::repo::stats::impact(&pool).await?))
}
