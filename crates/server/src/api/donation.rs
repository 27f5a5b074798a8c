use dioxus::prelude::*;
use shared_types::{CreateDonationRequest, DonationResponse};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

/// Every donation and request, unordered.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_donations() -> Result<Vec<DonationResponse>, ServerFnError> {
    let db = get_db().await;
    let donations = crate::repo::donation::list(db)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    Ok(donations.into_iter().map(DonationResponse::from).collect())
}

/// Record a donation offer or a food request.
#[cfg_attr(feature = "server", tracing::instrument(skip(req), fields(direction = ?req.direction)))]
#[server]
pub async fn submit_donation(req: CreateDonationRequest) -> Result<DonationResponse, ServerFnError> {
    req.validate_request().map_err(|e| e.into_server_fn_error())?;
    let pickup_at = req.check().map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let donation = crate::repo::donation::create(db, &req, pickup_at)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(donation_id = %donation.id, quantity = donation.quantity, "Donation recorded");
    Ok(DonationResponse::from(donation))
}
