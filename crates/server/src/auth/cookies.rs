use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};
use std::sync::{Arc, Mutex};

use super::jwt;

pub const ACCESS_COOKIE: &str = "ms_access";
pub const REFRESH_COOKIE: &str = "ms_refresh";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty())
}

/// HTTP-only, `SameSite=Lax` cookie scoped to the whole site.
fn auth_cookie(name: &'static str, value: &str, max_age_secs: i64) -> Option<HeaderValue> {
    let mut builder = Cookie::build((name, value.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        builder = builder.domain(domain);
    }

    match HeaderValue::from_str(&builder.build().to_string()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(cookie = name, error = %e, "Cookie is not a valid header value");
            None
        }
    }
}

pub fn build_access_cookie(token: &str, max_age_minutes: i64) -> Option<HeaderValue> {
    auth_cookie(ACCESS_COOKIE, token, max_age_minutes * 60)
}

pub fn build_refresh_cookie(token: &str, max_age_days: i64) -> Option<HeaderValue> {
    auth_cookie(REFRESH_COOKIE, token, max_age_days * 86_400)
}

/// Extract the access token from cookies (preferred) or Bearer header (fallback).
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, ACCESS_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, REFRESH_COOKIE)
}

/// Parse a specific cookie value from the Cookie header(s).
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Set both auth cookies using the configured token lifetimes.
pub fn set_auth_cookies(headers: &mut HeaderMap, access_token: &str, refresh_token: &str) {
    let cookies = [
        build_access_cookie(access_token, jwt::access_token_expiry_minutes()),
        build_refresh_cookie(refresh_token, jwt::refresh_token_expiry_days()),
    ];
    for value in cookies.into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Expire both auth cookies.
pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        if let Some(value) = auth_cookie(name, "", 0) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}

/// Cookie change requested by a server function, applied by the auth
/// middleware once the response exists.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set {
        access_token: String,
        refresh_token: String,
    },
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        *self.0.lock().unwrap_or_else(|p| p.into_inner()) = Some(action);
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().unwrap_or_else(|p| p.into_inner()).take()
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Schedule auth cookies to be set by the middleware (server functions only).
pub fn schedule_auth_cookies(access_token: &str, refresh_token: &str) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    });
}

/// Schedule auth cookies to be cleared by the middleware (server functions only).
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_prefers_cookie_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; ms_access=cookie-token"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        assert_eq!(extract_access_token(&headers).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn bearer_header_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        assert_eq!(extract_access_token(&headers).as_deref(), Some("header-token"));
        assert_eq!(extract_refresh_token(&headers), None);
    }

    #[test]
    fn set_cookies_are_http_only() {
        let mut headers = HeaderMap::new();
        set_auth_cookies(&mut headers, "a", "r");
        let values: Vec<_> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.contains("HttpOnly")));
        assert!(values[0].starts_with("ms_access=a"));
        assert!(values[1].starts_with("ms_refresh=r"));
    }

    #[test]
    fn cleared_cookies_expire_immediately() {
        let mut headers = HeaderMap::new();
        clear_auth_cookies(&mut headers);
        for v in headers.get_all(header::SET_COOKIE) {
            assert!(v.to_str().unwrap().contains("Max-Age=0"));
        }
    }

    #[test]
    fn cookie_slot_take_empties_it() {
        let slot = CookieSlot::default();
        slot.put(PendingCookieAction::Clear);
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
        assert_eq!(slot.take(), None);
    }
}
