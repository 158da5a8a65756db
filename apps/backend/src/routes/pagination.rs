use serde::Deserialize;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Offsets are bound as signed 64-bit integers.
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// `?skip=..&limit=..` for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    /// `(skip, limit)` with defaults applied, `skip` capped at `MAX_SKIP` and
    /// `limit` clamped to `1..=MAX_LIMIT`.
    pub fn bounds(&self) -> (u64, u64) {
        (
            self.skip.unwrap_or(0).min(MAX_SKIP),
            self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        )
    }
}
