use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, AuthResponse, AuthUser, LoginRequest, MembershipResponse, RegisterRequest, Role,
};

use crate::auth::{cookies, extractors::{AuthRequired, MaybeAuth}};
use crate::error_convert::ValidateRequest;

fn session_cookies(session: &crate::auth::Session) -> HeaderMap {
    let mut headers = HeaderMap::new();
    cookies::set_auth_cookies(&mut headers, &session.access_token, &session.refresh_token);
    headers
}

// ---------------------------------------------------------------------------
// POST /api/auth/register
// ---------------------------------------------------------------------------

/// Register a citizen account and sign it in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 409, description = "Email already registered", body = AppError),
        (status = 422, description = "Validation error", body = AppError),
        (status = 429, description = "Too many attempts", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn register(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), AppError> {
    payload.validate_request()?;

    let (user, session) = crate::auth::register_user(&pool, &payload).await?;
    let headers = session_cookies(&session);

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse {
            user,
            access_token: session.access_token,
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError),
        (status = 429, description = "Too many attempts", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn login(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), AppError> {
    payload.validate_request()?;

    let (user, session) = crate::auth::sign_in(&pool, &payload.email, &payload.password).await?;
    let headers = session_cookies(&session);

    Ok((
        headers,
        Json(AuthResponse {
            user,
            access_token: session.access_token,
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /api/auth/logout
// ---------------------------------------------------------------------------

/// Revoke refresh tokens and clear cookies. Succeeds when signed out too.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Logged out")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(pool, auth))]
pub async fn logout(
    State(pool): State<Pool<Postgres>>,
    auth: MaybeAuth,
) -> Result<(StatusCode, HeaderMap), AppError> {
    if let Some(claims) = auth.0 {
        crate::auth::revoke_sessions(&pool, claims.sub).await?;
    }

    let mut headers = HeaderMap::new();
    cookies::clear_auth_cookies(&mut headers);
    Ok((StatusCode::NO_CONTENT, headers))
}

// ---------------------------------------------------------------------------
// GET /api/auth/me
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Signed-in identity", body = AuthUser),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
) -> Result<Json<AuthUser>, AppError> {
    crate::repo::account::find_auth_user(&pool, auth.0.sub)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
}

// ---------------------------------------------------------------------------
// GET /api/membership/{role}
// ---------------------------------------------------------------------------

/// Whether the caller's email is in the role's collection.
#[utoipa::path(
    get,
    path = "/api/membership/{role}",
    params(("role" = String, Path, description = "`user` or `ngo`")),
    responses(
        (status = 200, description = "Membership result", body = MembershipResponse),
        (status = 400, description = "Unknown role", body = AppError)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn check_membership(
    State(pool): State<Pool<Postgres>>,
    auth: MaybeAuth,
    Path(role): Path<String>,
) -> Result<Json<MembershipResponse>, AppError> {
    let role: Role = role.parse().map_err(AppError::bad_request)?;

    let member = match auth.0 {
        Some(claims) => crate::repo::membership::is_member(&pool, role, &claims.email).await?,
        None => false,
    };

    Ok(Json(MembershipResponse { member }))
}
