mod common;

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::test;
use async_trait::async_trait;
use backend_test_support::assert_problem_details;
use classroom_api::auth::jwt::verify_access_token;
use classroom_api::auth::oauth::{IdentityProvider, OAuthError, ProviderProfile};
use classroom_api::config::db::DbKind;
use classroom_api::infra::state::build_state;
use classroom_api::repos::users;
use classroom_api::state::app_state::AppState;
use serde_json::Value;
use url::form_urlencoded;

/// Provider double: consent URL on a fake host, canned profile on exchange.
#[derive(Debug)]
struct StubProvider {
    profile: ProviderProfile,
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, OAuthError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .finish();
        Ok(format!("https://idp.test/authorize?{query}"))
    }

    async fn exchange_code(
        &self,
        code: &str,
        _redirect_uri: &str,
    ) -> Result<ProviderProfile, OAuthError> {
        if code == "bad-code" {
            return Err(OAuthError::Provider("invalid_grant".to_string()));
        }
        Ok(self.profile.clone())
    }
}

async fn state_with_provider(email: Option<&str>, name: Option<&str>) -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(common::test_security())
        .with_identity_provider(Arc::new(StubProvider {
            profile: ProviderProfile {
                email: email.map(str::to_string),
                name: name.map(str::to_string),
            },
        }))
        .build()
        .await
        .unwrap()
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

fn query_params(url: &str) -> HashMap<String, String> {
    let (_, query) = url.split_once('?').expect("url has a query");
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

#[actix_web::test]
async fn demo_login_redirects_to_dashboard_with_demo_token() {
    let state = common::sqlite_state().await;
    let security = state.security.clone();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/auth/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let loc = location(&resp);
    assert!(loc.starts_with("/dashboard?"), "unexpected redirect {loc}");
    let params = query_params(&loc);
    assert_eq!(params["user_id"], "1");
    assert_eq!(params["user_name"], "Demo User");

    let claims = verify_access_token(&params["token"], &security).unwrap();
    assert_eq!(claims.sub, "demo@example.com");
}

#[actix_web::test]
async fn provider_login_sets_state_cookie_and_redirects() {
    let state = state_with_provider(Some("t@school.edu"), Some("T")).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/auth/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "oauth_state")
        .expect("oauth_state cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));

    let loc = location(&resp);
    assert!(loc.starts_with("https://idp.test/authorize?"));
    let params = query_params(&loc);
    assert_eq!(params["state"], cookie.value());
    assert!(params["redirect_uri"].ends_with("/api/v1/auth/callback"));
}

#[actix_web::test]
async fn callback_creates_user_and_redirects_with_token() {
    let state = state_with_provider(Some("t@school.edu"), Some("Teacher T")).await;
    let db_state = state.clone();
    let security = state.security.clone();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/callback?code=good&state=s1")
        .cookie(Cookie::new("oauth_state", "s1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let params = query_params(&location(&resp));
    let user = users::find_user_by_email(db_state.require_db().unwrap(), "t@school.edu")
        .await
        .unwrap()
        .expect("user created");
    assert_eq!(params["user_id"], user.id.to_string());
    assert_eq!(params["user_name"], "Teacher T");
    assert_eq!(
        verify_access_token(&params["token"], &security).unwrap().sub,
        "t@school.edu"
    );

    // Second login resolves to the same row.
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/callback?code=good&state=s2")
        .cookie(Cookie::new("oauth_state", "s2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(query_params(&location(&resp))["user_id"], user.id.to_string());
}

#[actix_web::test]
async fn token_from_callback_opens_me() {
    let state = state_with_provider(Some("me@school.edu"), Some("Me")).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/callback?code=good&state=abc")
        .cookie(Cookie::new("oauth_state", "abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let token = query_params(&location(&resp))["token"].clone();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(common::bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], "me@school.edu");
    assert_eq!(body["name"], "Me");
}

#[actix_web::test]
async fn callback_rejects_missing_or_mismatched_state() {
    let state = state_with_provider(Some("t@school.edu"), None).await;
    let db_state = state.clone();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/callback?code=good&state=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        StatusCode::BAD_REQUEST,
        "AUTH_FAILED",
        Some("Authentication failed: OAuth state mismatch"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/callback?code=good&state=abc")
        .cookie(Cookie::new("oauth_state", "xyz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "AUTH_FAILED", None).await;

    assert!(users::find_user_by_email(db_state.require_db().unwrap(), "t@school.edu")
        .await
        .unwrap()
        .is_none());
}

#[actix_web::test]
async fn callback_without_email_fails() {
    let state = state_with_provider(None, Some("No Email")).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/callback?code=good&state=abc")
        .cookie(Cookie::new("oauth_state", "abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        StatusCode::BAD_REQUEST,
        "AUTH_FAILED",
        Some("Email not provided"),
    )
    .await;
}

#[actix_web::test]
async fn provider_exchange_failure_is_auth_failed() {
    let state = state_with_provider(Some("t@school.edu"), None).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/callback?code=bad-code&state=abc")
        .cookie(Cookie::new("oauth_state", "abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        StatusCode::BAD_REQUEST,
        "AUTH_FAILED",
        Some("invalid_grant"),
    )
    .await;
}

#[actix_web::test]
async fn logout_acknowledges() {
    let state = common::sqlite_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, serde_json::json!({"message": "Logged out successfully"}));
}
