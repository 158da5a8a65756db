//! Error codes for the classroom API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code renders as the SCREAMING_SNAKE_CASE string clients see in the
//! `code` field of a problem response.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No, garbage, or invalid credential on a protected request
    Unauthorized,
    /// Identity provider exchange or OAuth state check failed
    AuthFailed,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Student references a teacher that does not exist
    UnknownTeacher,

    // Resource Not Found
    TeacherNotFound,
    StudentNotFound,
    NotFound,

    // Conflicts
    /// Unique email constraint
    UniqueEmail,
    /// Row is still referenced (teacher with students)
    StillReferenced,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::AuthFailed => "AUTH_FAILED",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::UnknownTeacher => "UNKNOWN_TEACHER",

            Self::TeacherNotFound => "TEACHER_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::StillReferenced => "STILL_REFERENCED",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
