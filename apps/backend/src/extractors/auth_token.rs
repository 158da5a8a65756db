use actix_web::http::header;
use actix_web::HttpRequest;

/// Parse `Authorization: Bearer <token>`. The error is the internal cause,
/// for logging only.
pub fn bearer_token(req: &HttpRequest) -> Result<String, &'static str> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("missing authorization header")?
        .to_str()
        .map_err(|_| "authorization header is not ascii")?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(token.to_string())
        }
        _ => Err("malformed authorization header"),
    }
}
