// Server-only auth helpers for server functions.
// These are shared across all api/* modules.

use axum::http::HeaderMap;
use dioxus::prelude::*;
use shared_types::{AppError, NgoProfile};

use crate::auth::jwt::Claims;
use crate::db::get_db;
use crate::error_convert::AppErrorExt;

/// Claims for the current request, if the caller holds a valid access token.
/// Checks middleware-injected Claims first, falls back to cookie parsing.
pub(crate) fn current_claims() -> Option<Claims> {
    use crate::auth::{cookies, jwt};

    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<Claims>() {
        return Some(claims.clone());
    }

    let token = cookies::extract_access_token(&parts.headers)?;
    jwt::validate_access_token(&token).ok()
}

/// Extract and validate the caller's identity from the current request.
pub(crate) fn require_auth() -> Result<Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}

/// Require a signed-in caller whose email is registered as an NGO.
pub(crate) async fn require_ngo() -> Result<(Claims, NgoProfile), ServerFnError> {
    let claims = require_auth()?;
    let db = get_db().await;

    let ngo = crate::repo::ngo::find_by_email(db, &claims.email)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| {
            tracing::warn!(account_id = %claims.sub, "Triage attempted without NGO membership");
            AppError::forbidden("NGO membership required").into_server_fn_error()
        })?;

    Ok((claims, ngo))
}

/// Headers of the current request, for rate limiting.
pub(crate) fn request_headers() -> HeaderMap {
    dioxus::fullstack::FullstackContext::current()
        .map(|ctx| ctx.parts_mut().headers.clone())
        .unwrap_or_default()
}

/// Socket address of the connected client, when the server records it.
pub(crate) fn request_peer() -> Option<std::net::SocketAddr> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    parts
        .extensions
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0)
}
