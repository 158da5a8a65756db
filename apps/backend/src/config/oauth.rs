use std::env;

/// Google OAuth client registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl GoogleOAuthConfig {
    /// Reads `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET`.
    ///
    /// Returns `None` unless both are set and non-blank; the login flow then
    /// falls back to the demo identity.
    pub fn from_env() -> Option<Self> {
        let client_id = non_blank_var("GOOGLE_CLIENT_ID")?;
        let client_secret = non_blank_var("GOOGLE_CLIENT_SECRET")?;
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
