#![allow(dead_code)]

// tests/common/mod.rs
use std::time::{Duration, SystemTime};

use classroom_api::auth::jwt::mint_access_token;
use classroom_api::config::db::DbKind;
use classroom_api::infra::state::build_state;
use classroom_api::repos::users::{self, User};
use classroom_api::state::app_state::AppState;
use classroom_api::state::security_config::SecurityConfig;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Fresh, migrated in-memory database per call.
pub async fn sqlite_state() -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .build()
        .await
        .expect("build sqlite state")
}

/// Insert a user and mint a valid bearer token for it.
pub async fn seed_user(state: &AppState, email: &str, name: &str) -> (User, String) {
    let db = state.require_db().expect("state has db");
    let user = users::create_user(db, email, name)
        .await
        .expect("create user");
    let token = mint_access_token(
        email,
        Duration::from_secs(3600),
        SystemTime::now(),
        &state.security,
    )
    .expect("mint token");
    (user, token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Full route table behind the same middleware `main.rs` installs (minus CORS).
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(classroom_api::middleware::StructuredLogger)
                .wrap(classroom_api::middleware::TraceSpan)
                .wrap(classroom_api::middleware::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(classroom_api::routes::configure),
        )
        .await
    };
}
