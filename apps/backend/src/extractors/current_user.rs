use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use tracing::debug;

use super::auth_token::bearer_token;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::repos::users::{self, User};
use crate::state::app_state::AppState;

/// The authenticated caller, resolved from the bearer token to a user row.
///
/// Every failure (missing header, bad token, unknown user) is a plain 401 so
/// callers cannot tell which check failed. Token checks run before any
/// database access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

fn reject(req: &HttpRequest, cause: &str) -> AppError {
    security::bearer_rejected(cause, req.path());
    AppError::unauthorized()
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            if let Some(user) = req.extensions().get::<CurrentUser>() {
                return Ok(user.clone());
            }

            let token = bearer_token(&req).map_err(|cause| reject(&req, cause))?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState missing from request"))?;

            let claims = verify_access_token(&token, &state.security)
                .map_err(|e| reject(&req, &e.to_string()))?;

            let db = state.require_db()?;
            let user = users::find_user_by_email(db, &claims.sub)
                .await?
                .ok_or_else(|| reject(&req, "no user for token subject"))?;

            debug!(user_id = user.id, "bearer accepted");
            let current = CurrentUser::from(user);
            req.extensions_mut().insert(current.clone());
            Ok(current)
        })
    }
}
