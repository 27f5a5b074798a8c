use dioxus::prelude::*;
use shared_types::{
    ContactMessageResponse, CreateContactRequest, CreateVolunteerRequest, ImpactStats,
    NgoResponse, VolunteerResponse,
};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn submit_volunteer(
    req: CreateVolunteerRequest,
) -> Result<VolunteerResponse, ServerFnError> {
    req.validate_request().map_err(|e| e.into_server_fn_error())?;
    req.check().map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let volunteer = crate::repo::volunteer::create(db, &req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(volunteer_id = %volunteer.id, "Volunteer application received");
    Ok(VolunteerResponse::from(volunteer))
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn submit_contact(
    req: CreateContactRequest,
) -> Result<ContactMessageResponse, ServerFnError> {
    req.validate_request().map_err(|e| e.into_server_fn_error())?;
    req.check().map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let message = crate::repo::contact::create(db, &req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(message_id = %message.id, "Contact message received");
    Ok(ContactMessageResponse::from(message))
}

/// Registered partner organizations, alphabetically.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_ngos() -> Result<Vec<NgoResponse>, ServerFnError> {
    let db = get_db().await;
    let ngos = crate::repo::ngo::list(db)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    Ok(ngos.into_iter().map(NgoResponse::from).collect())
}

/// Profile of the signed-in NGO. Fails with Forbidden for non-members.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_ngo_profile() -> Result<NgoResponse, ServerFnError> {
    let (_, ngo) = require_ngo().await?;
    Ok(NgoResponse::from(ngo))
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_impact_stats() -> Result<ImpactStats, ServerFnError> {
    let db = get_db().await;
    crate::repo::stats::impact(db)
        .await
        .map_err(|e| e.into_server_fn_error())
}
