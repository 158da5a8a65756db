use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Lifetime of every access token minted at login.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Process-wide signing configuration, read-only after startup.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared HMAC secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm, pinned during verification
    pub algorithm: Algorithm,
    /// TTL applied by the login flow
    pub access_token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: ACCESS_TOKEN_TTL,
        }
    }
}

// The secret must never reach a log line.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secret() {
        let cfg = SecurityConfig::new("super-secret-value");
        let out = format!("{cfg:?}");
        assert!(!out.contains("super-secret-value"));
        assert!(out.contains("HS256"));
    }

    #[test]
    fn login_ttl_is_sixty_minutes() {
        assert_eq!(SecurityConfig::default().access_token_ttl.as_secs(), 3600);
    }
}
