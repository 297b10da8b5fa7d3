use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::models::{WithdrawRequest, WithdrawalResponse};
use crate::auth::Claims;
use crate::gateway::{error::ApiError, state::AppState};

/// POST /api/user/balance/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<WithdrawRequest>,
) -> Result<StatusCode, ApiError> {
    // Floats exist only at the JSON boundary; the sum becomes a
    // two-decimal fixed-point value before any arithmetic.
    let sum = Decimal::from_f64(req.sum)
        .map(|s| s.round_dp(2))
        .ok_or_else(|| ApiError::unprocessable_entity("invalid sum"))?;

    state
        .withdrawals
        .withdraw(claims.user_id, &req.order, sum)
        .await?;
    Ok(StatusCode::OK)
}

/// GET /api/user/withdrawals
pub async fn list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let withdrawals = state.withdrawals.list(claims.user_id).await?;

    if withdrawals.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<WithdrawalResponse> =
        withdrawals.iter().map(WithdrawalResponse::from).collect();
    Ok(Json(body).into_response())
}
