use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::oauth::{IdentityProvider, OAuthError, ProviderProfile};
use crate::config::oauth::GoogleOAuthConfig;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const SCOPES: &str = "openid email profile";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

/// Google's OpenID Connect endpoints, spoken over plain reqwest.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    config: GoogleOAuthConfig,
    http: Client,
}

impl GoogleProvider {
    pub fn new(config: GoogleOAuthConfig) -> Result<Self, OAuthError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| OAuthError::Provider(format!("http client init failed: {e}")))?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, OAuthError> {
        build_authorization_url(&self.config.client_id, redirect_uri, state)
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderProfile, OAuthError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let resp = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| OAuthError::Provider(format!("token request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| OAuthError::Provider(format!("token response unreadable: {e}")))?;
        let access_token = parse_token_response(status, &body)?;

        let resp = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(|e| OAuthError::Provider(format!("userinfo request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| OAuthError::Provider(format!("userinfo response unreadable: {e}")))?;

        debug!(status = status.as_u16(), "google userinfo fetched");
        parse_userinfo(status, &body)
    }
}

fn build_authorization_url(
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> Result<String, OAuthError> {
    let url = Url::parse_with_params(
        GOOGLE_AUTH_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("state", state),
            ("prompt", "select_account"),
        ],
    )
    .map_err(|e| OAuthError::Provider(format!("invalid authorization url: {e}")))?;
    Ok(url.into())
}

fn parse_token_response(status: StatusCode, body: &str) -> Result<String, OAuthError> {
    if !status.is_success() {
        return Err(OAuthError::Provider(format!(
            "token endpoint returned {}",
            status.as_u16()
        )));
    }

    let parsed: TokenResponse = serde_json::from_str(body)
        .map_err(|e| OAuthError::Provider(format!("token response malformed: {e}")))?;
    if parsed.access_token.trim().is_empty() {
        return Err(OAuthError::Provider(
            "token response missing access_token".to_string(),
        ));
    }
    Ok(parsed.access_token)
}

/// An email Google marks as unverified is treated as absent.
fn parse_userinfo(status: StatusCode, body: &str) -> Result<ProviderProfile, OAuthError> {
    if !status.is_success() {
        return Err(OAuthError::Provider(format!(
            "userinfo endpoint returned {}",
            status.as_u16()
        )));
    }

    let info: UserInfo = serde_json::from_str(body)
        .map_err(|e| OAuthError::Provider(format!("userinfo malformed: {e}")))?;

    let email = match info.email_verified {
        Some(false) => None,
        _ => info.email,
    };

    Ok(ProviderProfile {
        email,
        name: info.name,
    })
}
