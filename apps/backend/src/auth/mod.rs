//! Authentication core: token codec, OAuth exchange, Google provider.

pub mod google;
pub mod jwt;
pub mod oauth;

pub use jwt::{mint_access_token, verify_access_token, Claims, TokenError};
pub use oauth::{begin_login, handle_callback, IdentityClaims, IdentityProvider, LoginStart, OAuthError};
