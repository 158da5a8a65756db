use crate::error::AppError;

/// Which database the process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Configured Postgres instance (production)
    Postgres,
    /// Private in-memory SQLite database (tests, local demo runs)
    SqliteMemory,
}

/// Builds the connection URL for `kind`.
///
/// Postgres honours a non-blank `DATABASE_URL`; otherwise the URL is assembled
/// from `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT`, and `DB_NAME`.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::Postgres => migration::postgres_url_from_env().map_err(AppError::config),
    }
}
