//! Postgres connection URL from the environment, shared by the backend and the
//! migration CLI.

use std::env;

use url::Url;

/// `DATABASE_URL` when set and non-blank; otherwise assembled from `DB_USER`,
/// `DB_PASSWORD`, `DB_HOST` (default `localhost`), `DB_PORT` (default `5432`)
/// and `DB_NAME`. Credentials are percent-encoded into the userinfo.
pub fn postgres_url_from_env() -> Result<String, String> {
    if let Some(url) = non_blank_var("DATABASE_URL") {
        return Ok(url);
    }

    let host = non_blank_var("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = non_blank_var("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let name = must_var("DB_NAME")?;
    let user = must_var("DB_USER")?;
    let password = must_var("DB_PASSWORD")?;

    let mut url = Url::parse(&format!("postgresql://{host}:{port}/{name}"))
        .map_err(|e| format!("Invalid database location '{host}:{port}/{name}': {e}"))?;
    url.set_username(&user)
        .and_then(|()| url.set_password(Some(&password)))
        .map_err(|()| "Database URL cannot carry credentials".to_string())?;

    Ok(url.into())
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn must_var(name: &str) -> Result<String, String> {
    non_blank_var(name).ok_or_else(|| format!("Required environment variable '{name}' is not set"))
}
