use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::prelude::ToPrimitive;

use super::models::{BalanceResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::auth::Claims;
use crate::gateway::{error::ApiError, state::AppState};

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let (user, token) = state.users.register(&req.login, &req.password).await?;

    let mut response = (
        StatusCode::OK,
        Json(UserResponse {
            user_id: user.id,
            login: user.login,
        }),
    )
        .into_response();
    set_auth_token(&mut response, &token, state.tokens.expiration().as_secs());
    Ok(response)
}

/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (user, token) = state.users.login(&req.login, &req.password).await?;

    let mut response = (
        StatusCode::OK,
        Json(UserResponse {
            user_id: user.id,
            login: user.login,
        }),
    )
        .into_response();
    set_auth_token(&mut response, &token, state.tokens.expiration().as_secs());
    Ok(response)
}

/// GET /api/user/balance
pub async fn balance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let user = state.users.get_balance(claims.user_id).await?;

    Ok(Json(BalanceResponse {
        current: user.balance.to_f64().unwrap_or_default(),
        withdrawn: user.withdrawn.to_f64().unwrap_or_default(),
    }))
}

/// Attach the token to the response as both an `Authorization` header
/// and an `Authorization` cookie.
fn set_auth_token(response: &mut Response, token: &str, max_age_secs: u64) {
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
        headers.insert(header::AUTHORIZATION, value);
    }

    let cookie = format!(
        "Authorization={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age_secs}"
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
}
