//! Turn verified provider identities into local users and sessions.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::auth::jwt::mint_access_token;
use crate::auth::oauth::{dashboard_url, IdentityClaims};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};
use crate::state::security_config::SecurityConfig;

/// Find or create the user for `identity` and mint their access token.
///
/// Idempotent: repeat logins with the same email resolve to the same user.
pub async fn complete_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &IdentityClaims,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<(String, User), AppError> {
    let user = ensure_user(conn, identity).await?;
    let token = mint_access_token(&user.email, security.access_token_ttl, now, security)?;

    info!(user_id = user.id, email = %Redacted(&user.email), "login completed");
    Ok((token, user))
}

/// `/dashboard?token=..&user_id=..&user_name=..` for a logged-in user.
pub fn dashboard_redirect(token: &str, user: &User) -> String {
    dashboard_url(token, user.id, &user.name)
}

async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &IdentityClaims,
) -> Result<User, AppError> {
    if let Some(user) = users::find_user_by_email(conn, &identity.email).await? {
        debug!(user_id = user.id, "existing user");
        return Ok(user);
    }

    match users::create_user(conn, &identity.email, &identity.name).await {
        Ok(user) => {
            info!(user_id = user.id, email = %Redacted(&user.email), "user created");
            Ok(user)
        }
        // A concurrent first login won the insert; use its row.
        Err(DomainError::Conflict(ConflictKind::UniqueEmail, _)) => {
            users::find_user_by_email(conn, &identity.email)
                .await?
                .ok_or_else(|| AppError::internal("user vanished after unique email conflict"))
        }
        Err(e) => Err(e.into()),
    }
}
