use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::gateway::{error::ApiError, state::AppState};

const AUTH_COOKIE: &str = "Authorization";

/// Require a valid bearer token on the request.
///
/// The token is taken from the `Authorization` header first, then from
/// the `Authorization` cookie. Validated claims are inserted into the
/// request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = token_from_header(&request).or_else(|| token_from_cookie(&request));

    let Some(token) = token else {
        return Err(ApiError::unauthorized("missing or invalid token"));
    };

    let claims = state
        .tokens
        .validate(&token)
        .map_err(|_| ApiError::unauthorized("invalid token"))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract a token from an `Authorization: Bearer <token>` header.
fn token_from_header(request: &Request) -> Option<String> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if scheme.eq_ignore_ascii_case("bearer") && parts.next().is_none() {
        Some(token.to_string())
    } else {
        None
    }
}

/// Extract a token from the `Authorization` cookie.
fn token_from_cookie(request: &Request) -> Option<String> {
    let cookies = request.headers().get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_header(name: header::HeaderName, value: &str) -> Request {
        axum::http::Request::builder()
            .header(name, value)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn bearer_header_is_extracted() {
        let req = request_with_header(header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(token_from_header(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let req = request_with_header(header::AUTHORIZATION, "bearer abc");
        assert_eq!(token_from_header(&req).as_deref(), Some("abc"));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let req = request_with_header(header::AUTHORIZATION, "Basic abc");
        assert_eq!(token_from_header(&req), None);
    }

    #[test]
    fn cookie_token_is_extracted() {
        let req = request_with_header(header::COOKIE, "theme=dark; Authorization=tok123; lang=en");
        assert_eq!(token_from_cookie(&req).as_deref(), Some("tok123"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        let req = request_with_header(header::COOKIE, "theme=dark");
        assert_eq!(token_from_cookie(&req), None);
    }
}
