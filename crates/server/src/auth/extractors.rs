use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use shared_types::{AppError, NgoProfile};
use sqlx::{Pool, Postgres};

use super::jwt::Claims;
use crate::repo;

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Extractor that optionally extracts auth claims. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Extractor that requires a signed-in account with an NGO profile.
/// Returns 401 if unauthenticated, 403 if the email is not in `ngos`.
pub struct NgoMember {
    pub claims: Claims,
    pub ngo: NgoProfile,
}

impl<S> FromRequestParts<S> for NgoMember
where
    S: Send + Sync,
    Pool<Postgres>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthRequired(claims) = AuthRequired::from_request_parts(parts, state).await?;
        let pool = Pool::<Postgres>::from_ref(state);

        let ngo = repo::ngo::find_by_email(&pool, &claims.email)
            .await?
            .ok_or_else(|| AppError::forbidden("NGO membership required"))?;

        Ok(NgoMember { claims, ngo })
    }
}
