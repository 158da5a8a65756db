use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a failed login attempt (provider error, missing email, bad OAuth state).
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        reason,
        "Authentication failure"
    );
}

/// Log a rejected bearer credential. `cause` is the internal reason that the
/// client never sees.
pub fn bearer_rejected(cause: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_BEARER_REJECTED",
        %trace_id,
        cause,
        path,
        "Rejected bearer credential"
    );
}
