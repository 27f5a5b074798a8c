pub mod auth;
pub mod community;
pub mod donation;
pub mod issue;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::db::AppState;
use crate::rate_limit::rate_limit_middleware;

// Re-exported so openapi.rs can reference handlers at rest::*
pub use auth::*;
pub use community::*;
pub use donation::*;
pub use issue::*;

/// Build the REST API router.
pub fn api_router(state: &AppState) -> Router<AppState> {
    // Credential endpoints share the per-client attempt budget.
    let credentials = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(
            state.auth_limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .merge(credentials)
        // Session
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/membership/{role}", get(auth::check_membership))
        // Issues
        .route("/api/issues", get(issue::list_issues).post(issue::create_issue))
        .route("/api/issues/images", post(issue::upload_issue_image))
        .route("/api/issues/{id}", get(issue::get_issue))
        .route("/api/issues/{id}/status", patch(issue::update_issue_status))
        // Donations
        .route("/api/donations", get(donation::list_donations).post(donation::create_donation))
        // Community
        .route("/api/volunteers", post(community::create_volunteer))
        .route("/api/contact", post(community::create_contact_message))
        .route("/api/ngos", get(community::list_ngos))
        .route("/api/stats", get(community::impact_stats))
}
