use dioxus::prelude::*;
use shared_types::{AuthUser, FeatureFlags, Role};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

/// Feature flags the client uses to hide disabled functionality.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Register a citizen account. Sets HTTP-only auth cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn register(
    name: String,
    email: String,
    password: String,
) -> Result<AuthUser, ServerFnError> {
    use crate::auth::cookies;
    use shared_types::RegisterRequest;

    crate::rate_limit::check_auth_attempt(&request_headers(), request_peer())
        .map_err(|e| e.into_server_fn_error())?;

    let req = RegisterRequest {
        name,
        email,
        password,
    };
    req.validate_request().map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let (user, session) = crate::auth::register_user(db, &req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_auth_cookies(&session.access_token, &session.refresh_token);
    Ok(user)
}

/// Sign in with email and password. Sets HTTP-only auth cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::cookies;
    use shared_types::LoginRequest;

    crate::rate_limit::check_auth_attempt(&request_headers(), request_peer())
        .map_err(|e| e.into_server_fn_error())?;

    let req = LoginRequest { email, password };
    req.validate_request().map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let (user, session) = crate::auth::sign_in(db, &req.email, &req.password)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_auth_cookies(&session.access_token, &session.refresh_token);
    Ok(user)
}

/// The signed-in identity, or `None` when signed out.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    let Some(claims) = current_claims() else {
        return Ok(None);
    };

    let db = get_db().await;
    let user = crate::repo::account::find_auth_user(db, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    // Token outlived its account.
    if user.is_none() {
        crate::auth::cookies::schedule_clear_cookies();
    }
    Ok(user)
}

/// Revoke the caller's refresh tokens and clear the auth cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    if let Some(claims) = current_claims() {
        let db = get_db().await;
        if let Err(e) = crate::auth::revoke_sessions(db, claims.sub).await {
            tracing::warn!(error = %e, "Failed to revoke refresh tokens on logout");
        }
    }

    crate::auth::cookies::schedule_clear_cookies();
    Ok(())
}

/// Whether the signed-in identity has a record in the role's collection.
/// Signed-out callers are simply not members.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn check_role_membership(role: Role) -> Result<bool, ServerFnError> {
    let Some(claims) = current_claims() else {
        return Ok(false);
    };

    let db = get_db().await;
    crate::repo::membership::is_member(db, role, &claims.email)
        .await
        .map_err(|e| e.into_server_fn_error())
}
