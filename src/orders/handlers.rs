use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::error::OrderError;
use super::models::OrderResponse;
use crate::auth::Claims;
use crate::gateway::{error::ApiError, state::AppState};

/// POST /api/user/orders
///
/// The body is the plain-text order number. A resubmission by the same
/// user answers 200; a fresh number answers 202.
pub async fn submit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: String,
) -> Result<StatusCode, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::bad_request("empty order number"));
    }

    match state.orders.submit(claims.user_id, &body).await {
        Ok(()) => Ok(StatusCode::ACCEPTED),
        Err(OrderError::AlreadyUploaded) => Ok(StatusCode::OK),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/user/orders
pub async fn list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let orders = state.orders.list(claims.user_id).await?;

    if orders.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<OrderResponse> = orders.iter().map(OrderResponse::from).collect();
    Ok(Json(body).into_response())
}
