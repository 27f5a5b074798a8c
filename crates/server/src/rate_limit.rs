use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared_types::AppError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

/// Sliding window rate limit state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<RateLimitInner>>,
}

struct RateLimitInner {
    /// Map from client key -> list of request timestamps.
    requests: HashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
}

static AUTH_LIMITER: OnceLock<RateLimitState> = OnceLock::new();

impl RateLimitState {
    /// Create rate limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimitInner {
                requests: HashMap::new(),
                max_requests,
                window,
            })),
        }
    }

    /// The process-wide limiter guarding sign-in and registration. REST
    /// routes and server functions share it so the budget is per client,
    /// not per entry point.
    pub fn for_auth() -> Self {
        AUTH_LIMITER
            .get_or_init(|| {
                Self::new(
                    crate::config::auth_rate_limit_per_minute(),
                    Duration::from_secs(60),
                )
            })
            .clone()
    }

    /// Record an attempt from `key`. Returns false once the window is full.
    pub fn check(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let now = Instant::now();
        let window = inner.window;
        let max = inner.max_requests;

        // Drop keys whose newest attempt has aged out so the map stays small.
        inner
            .requests
            .retain(|_, ts| ts.last().is_some_and(|t| now.duration_since(*t) < window));

        let timestamps = inner.requests.entry(key.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() as u32 >= max {
            return false;
        }

        timestamps.push(now);
        true
    }
}

/// Identify the caller: first `X-Forwarded-For` hop, then `X-Real-IP`,
/// then the socket peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or(real_ip)
        .map(str::to_string)
        .or_else(|| peer.map(|p| p.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn rejection() -> AppError {
    AppError::rate_limited("Too many sign-in attempts. Please try again in a minute.")
}

/// Limiter check for server functions, which see the request parts but not
/// `State`.
pub fn check_auth_attempt(headers: &HeaderMap, peer: Option<SocketAddr>) -> Result<(), AppError> {
    if !crate::config::feature_flags().rate_limit {
        return Ok(());
    }
    let key = client_key(headers, peer);
    if RateLimitState::for_auth().check(&key) {
        Ok(())
    } else {
        tracing::warn!(client = %key, "Auth rate limit exceeded");
        Err(rejection())
    }
}

/// Axum middleware that enforces the auth limiter per client address.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    if !crate::config::feature_flags().rate_limit {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<axum::extract::ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let key = client_key(request.headers(), peer);

    if !state.check(&key) {
        tracing::warn!(client = %key, path = %request.uri().path(), "Auth rate limit exceeded");
        return rejection().into_response();
    }

    next.run(request).await
}
