use axum::{extract::State, http::StatusCode, Json};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, CreateDonationRequest, DonationResponse};

use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// GET /api/donations
// ---------------------------------------------------------------------------

/// All donations and requests.
#[utoipa::path(
    get,
    path = "/api/donations",
    responses(
        (status = 200, description = "Donations", body = Vec<DonationResponse>)
    ),
    tag = "donations"
)]
pub async fn list_donations(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<Vec<DonationResponse>>, AppError> {
    let donations = crate::repo::donation::list(&pool).await?;
    Ok(Json(donations.into_iter().map(DonationResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// POST /api/donations
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = CreateDonationRequest,
    responses(
        (status = 201, description = "Donation recorded", body = DonationResponse),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "donations"
)]
#[tracing::instrument(skip(pool, body), fields(direction = ?body.direction))]
pub async fn create_donation(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateDonationRequest>,
) -> Result<(StatusCode, Json<DonationResponse>), AppError> {
    body.validate_request()?;
    let pickup_at = body.check()?;

    let donation = crate::repo::donation::create(&pool, &body, pickup_at).await?;
    Ok((StatusCode::CREATED, Json(DonationResponse::from(donation))))
}
