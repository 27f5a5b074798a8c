use axum::Router;
use shared_types::{
    AppError, AppErrorKind, AuthResponse, AuthUser, ContactMessageResponse, CreateContactRequest,
    CreateDonationRequest, CreateIssueRequest, CreateVolunteerRequest, DonationDirection,
    DonationResponse, FoodType, ImageUploadRequest, ImageUploadResponse, ImpactStats,
    IssueAction, IssueCategory, IssueHandler, IssueResponse, IssueStatus, LoginRequest,
    MembershipResponse, NgoResponse, RegisterRequest, Role, UpdateIssueStatusRequest,
    VolunteerResponse,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        rest::register,
        rest::login,
        rest::logout,
        rest::me,
        rest::check_membership,
        // Issues
        rest::create_issue,
        rest::list_issues,
        rest::get_issue,
        rest::update_issue_status,
        rest::upload_issue_image,
        // Donations
        rest::list_donations,
        rest::create_donation,
        // Community
        rest::create_volunteer,
        rest::create_contact_message,
        rest::list_ngos,
        rest::impact_stats,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        AuthUser, Role, LoginRequest, RegisterRequest, AuthResponse, MembershipResponse,
        IssueCategory, IssueStatus, IssueAction, IssueHandler, IssueResponse,
        CreateIssueRequest, UpdateIssueStatusRequest, ImageUploadRequest, ImageUploadResponse,
        FoodType, DonationDirection, DonationResponse, CreateDonationRequest,
        VolunteerResponse, CreateVolunteerRequest,
        ContactMessageResponse, CreateContactRequest,
        NgoResponse, ImpactStats,
        health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Registration, sign-in and role membership"),
        (name = "issues", description = "Issue reporting and NGO triage"),
        (name = "donations", description = "Food donations and requests"),
        (name = "community", description = "Volunteers, contact messages, partners and impact"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Mero Samaj API",
        description = "Community issue reporting, food sharing and NGO coordination",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    let state = AppState::new(pool);

    Router::new()
        .merge(rest::api_router(&state))
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
