//! Authorization-code login against an external identity provider.
//!
//! `begin_login` either sends the browser to the provider (with a fresh
//! `state`) or, when no provider is registered, mints a session for the fixed
//! demo identity. `handle_callback` turns the provider's authorization code
//! into verified [`IdentityClaims`].

use std::fmt::Debug;
use std::time::SystemTime;

use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use url::form_urlencoded;

use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_USER_ID: i32 = 1;
pub const DEMO_USER_NAME: &str = "Demo User";

/// Where the browser lands after a successful login.
pub const DASHBOARD_PATH: &str = "/dashboard";

const STATE_LEN: usize = 32;

/// Email and display name attested by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub email: String,
    pub name: String,
}

/// Profile fields as the provider returned them, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OAuthError {
    /// Exchange with the provider failed or returned nothing usable
    #[error("{0}")]
    Provider(String),
    /// Provider answered without an email claim
    #[error("Email not provided by identity provider")]
    MissingEmail,
    /// Callback `state` does not match the one issued at login
    #[error("OAuth state mismatch")]
    StateMismatch,
}

/// Seam for the third-party identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync + Debug {
    /// Consent-screen URL the browser is redirected to.
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, OAuthError>;

    /// Trade an authorization code for the user's profile.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderProfile, OAuthError>;
}

/// Outcome of starting a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStart {
    /// Send the browser to the provider; `state` must come back on the callback.
    Provider {
        authorization_url: String,
        state: String,
    },
    /// No provider registered: a demo session was minted directly.
    Demo { redirect_url: String },
}

pub fn begin_login(
    provider: Option<&dyn IdentityProvider>,
    callback_url: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<LoginStart, AppError> {
    match provider {
        Some(provider) => {
            let state = generate_state();
            let authorization_url = provider.authorization_url(callback_url, &state)?;
            Ok(LoginStart::Provider {
                authorization_url,
                state,
            })
        }
        None => {
            let token = mint_access_token(DEMO_EMAIL, security.access_token_ttl, now, security)?;
            Ok(LoginStart::Demo {
                redirect_url: dashboard_url(&token, DEMO_USER_ID, DEMO_USER_NAME),
            })
        }
    }
}

pub async fn handle_callback(
    provider: &dyn IdentityProvider,
    code: &str,
    callback_url: &str,
) -> Result<IdentityClaims, OAuthError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(OAuthError::Provider(
            "Missing authorization code".to_string(),
        ));
    }

    let profile = provider.exchange_code(code, callback_url).await?;
    identity_from_profile(profile)
}

/// Email is the join key to the user directory, so it is mandatory; the name
/// may be absent and defaults to empty.
pub fn identity_from_profile(profile: ProviderProfile) -> Result<IdentityClaims, OAuthError> {
    let email = profile
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or(OAuthError::MissingEmail)?;

    Ok(IdentityClaims {
        email,
        name: profile.name.unwrap_or_default(),
    })
}

pub fn verify_state(expected: Option<&str>, received: Option<&str>) -> Result<(), OAuthError> {
    match (expected, received) {
        (Some(expected), Some(received)) if !expected.is_empty() && expected == received => Ok(()),
        _ => Err(OAuthError::StateMismatch),
    }
}

/// `/dashboard?token=..&user_id=..&user_name=..`
pub fn dashboard_url(token: &str, user_id: i32, user_name: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .append_pair("user_id", &user_id.to_string())
        .append_pair("user_name", user_name)
        .finish();
    format!("{DASHBOARD_PATH}?{query}")
}

fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LEN)
        .map(char::from)
        .collect()
}
