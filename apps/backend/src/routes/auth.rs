use std::time::SystemTime;

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::oauth::{begin_login, handle_callback, verify_state, LoginStart, OAuthError};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::logging::security;
use crate::services::sessions::{complete_login, dashboard_redirect};
use crate::state::app_state::AppState;

pub const OAUTH_STATE_COOKIE: &str = "oauth_state";
const OAUTH_STATE_COOKIE_PATH: &str = "/api/v1/auth";
const OAUTH_STATE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user denies consent
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn state_cookie(value: String) -> Cookie<'static> {
    Cookie::build(OAUTH_STATE_COOKIE, value)
        .path(OAUTH_STATE_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(OAUTH_STATE_TTL_MINUTES))
        .finish()
}

fn login_failure(e: OAuthError) -> AppError {
    security::login_failed(&e.to_string(), None);
    e.into()
}

async fn login(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let callback_url = req
        .url_for_static("auth_callback")
        .map_err(|e| AppError::internal(format!("cannot build callback url: {e}")))?;

    let start = begin_login(
        app_state.identity_provider.as_deref(),
        callback_url.as_str(),
        SystemTime::now(),
        &app_state.security,
    )?;

    match start {
        LoginStart::Provider {
            authorization_url,
            state,
        } => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, authorization_url))
            .cookie(state_cookie(state))
            .finish()),
        LoginStart::Demo { redirect_url } => Ok(found(&redirect_url)),
    }
}

async fn callback(
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let provider = app_state.identity_provider.as_deref().ok_or_else(|| {
        login_failure(OAuthError::Provider(
            "No identity provider configured".to_string(),
        ))
    })?;

    if let Some(error) = &query.error {
        return Err(login_failure(OAuthError::Provider(format!(
            "Provider returned error: {error}"
        ))));
    }

    let expected = req.cookie(OAUTH_STATE_COOKIE);
    verify_state(expected.as_ref().map(|c| c.value()), query.state.as_deref())
        .map_err(login_failure)?;

    let callback_url = req
        .url_for_static("auth_callback")
        .map_err(|e| AppError::internal(format!("cannot build callback url: {e}")))?;

    let identity = handle_callback(
        provider,
        query.code.as_deref().unwrap_or_default(),
        callback_url.as_str(),
    )
    .await
    .map_err(login_failure)?;

    let db = app_state.require_db()?;
    let (token, user) =
        complete_login(db, &identity, SystemTime::now(), &app_state.security).await?;

    let mut clear = state_cookie(String::new());
    clear.make_removal();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, dashboard_redirect(&token, &user)))
        .cookie(clear)
        .finish())
}

async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(user)
}

/// Tokens are stateless, so there is nothing to revoke server-side.
async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Logged out successfully",
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::get().to(login)))
        .service(
            web::resource("/callback")
                .name("auth_callback")
                .route(web::get().to(callback)),
        )
        .service(web::resource("/me").route(web::get().to(me)))
        .service(web::resource("/logout").route(web::post().to(logout)));
}
