pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;

use shared_types::{AppError, AuthUser, RegisterRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repo;

/// A freshly issued token pair. The refresh token's hash is already stored.
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign a new access/refresh pair for the account and persist the refresh hash.
pub async fn issue_session(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    email: &str,
) -> Result<Session, AppError> {
    let access_token = jwt::create_access_token(account_id, email)
        .map_err(|e| AppError::internal(format!("Failed to sign access token: {}", e)))?;
    let (refresh_token, expires_at) = jwt::create_refresh_token(account_id, email)
        .map_err(|e| AppError::internal(format!("Failed to sign refresh token: {}", e)))?;

    repo::refresh_token::store(pool, account_id, &jwt::hash_token(&refresh_token), expires_at)
        .await?;

    Ok(Session {
        access_token,
        refresh_token,
    })
}

/// Create an account and its citizen profile in one transaction, then sign in.
pub async fn register_user(
    pool: &Pool<Postgres>,
    req: &RegisterRequest,
) -> Result<(AuthUser, Session), AppError> {
    let email = req.email.trim();
    if !shared_types::is_plausible_email(email) {
        return Err(AppError::field("email", "Enter a valid email address"));
    }
    let password_hash = password::hash_password(&req.password)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(crate::error_convert::sqlx_to_app_error)?;
    let account = repo::account::create(&mut *tx, email, &password_hash).await?;
    let profile = repo::user::create(&mut *tx, account.id, &req.name, email).await?;
    tx.commit()
        .await
        .map_err(crate::error_convert::sqlx_to_app_error)?;

    tracing::info!(account_id = %account.id, "User registered");

    let session = issue_session(pool, account.id, &account.email).await?;
    Ok((
        AuthUser {
            id: account.id,
            name: profile.name,
            email: account.email,
        },
        session,
    ))
}

/// Verify credentials and open a session. Unknown email and wrong password
/// produce the same error.
pub async fn sign_in(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> Result<(AuthUser, Session), AppError> {
    let invalid = || AppError::unauthorized("Invalid email or password");

    let account = repo::account::find_by_email(pool, email)
        .await?
        .ok_or_else(invalid)?;
    if !password::verify_password(password, &account.password_hash) {
        tracing::info!(account_id = %account.id, "Sign-in rejected");
        return Err(invalid());
    }

    let user = repo::account::find_auth_user(pool, account.id)
        .await?
        .ok_or_else(invalid)?;
    let session = issue_session(pool, account.id, &account.email).await?;

    tracing::info!(account_id = %account.id, "Signed in");
    Ok((user, session))
}

/// Revoke every refresh token the account holds.
pub async fn revoke_sessions(pool: &Pool<Postgres>, account_id: Uuid) -> Result<(), AppError> {
    let revoked = repo::refresh_token::revoke_all(pool, account_id).await?;
    tracing::info!(account_id = %account_id, revoked, "Signed out");
    Ok(())
}
