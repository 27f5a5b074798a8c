use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sqlx::{Pool, Postgres};

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::{validate_access_token, validate_refresh_token};
use super::issue_session;
use crate::repo;

/// Permissive auth middleware that handles authentication and cookie management.
///
/// On each request:
/// 1. Validates the access token from cookies (or Bearer header fallback)
/// 2. If missing or invalid, attempts transparent refresh using the refresh cookie
/// 3. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 4. After the handler runs, applies any pending cookie actions to the response
///
/// Does NOT reject unauthenticated requests; downstream handlers decide authorization.
pub async fn auth_middleware(
    State(pool): State<Pool<Postgres>>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers().clone();
    let mut refresh_cookies: Option<(String, String)> = None;

    let access_token = cookies::extract_access_token(&headers);
    let mut needs_refresh = access_token.is_none();

    if let Some(token) = access_token {
        match validate_access_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(_) => {
                needs_refresh = true;
            }
        }
    }

    if needs_refresh {
        if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
            refresh_cookies = try_transparent_refresh(&pool, &refresh_token, &mut req).await;
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some((access, refresh)) = refresh_cookies {
        cookies::set_auth_cookies(response.headers_mut(), &access, &refresh);
    }

    // A scheduled action wins over the refresh above: logout must clear.
    match cookie_slot.take() {
        Some(PendingCookieAction::Set {
            access_token,
            refresh_token,
        }) => {
            cookies::set_auth_cookies(response.headers_mut(), &access_token, &refresh_token);
        }
        Some(PendingCookieAction::Clear) => {
            cookies::clear_auth_cookies(response.headers_mut());
        }
        None => {}
    }

    response
}

/// Exchange a refresh token for a fresh pair. The old token is consumed
/// atomically, so replaying it fails.
async fn try_transparent_refresh(
    pool: &Pool<Postgres>,
    refresh_token: &str,
    req: &mut Request,
) -> Option<(String, String)> {
    let claims = validate_refresh_token(refresh_token).ok()?;

    let token_hash = super::jwt::hash_token(refresh_token);
    match repo::refresh_token::consume(pool, claims.sub, &token_hash).await {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "Refresh token lookup failed");
            return None;
        }
    }

    let session = match issue_session(pool, claims.sub, &claims.email).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, account_id = %claims.sub, "Transparent refresh failed");
            return None;
        }
    };

    let new_claims = validate_access_token(&session.access_token).ok()?;
    tracing::debug!(account_id = %claims.sub, "Session refreshed");
    req.extensions_mut().insert(new_claims);

    Some((session.access_token, session.refresh_token))
}
