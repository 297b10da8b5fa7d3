//! Error to HTTP status mapping.
//!
//! Domain errors keep their taxonomy through the service layer and are
//! translated here, at the adapter boundary, only.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::orders::OrderError;
use crate::users::UserError;
use crate::withdrawals::WithdrawError;

/// HTTP-facing error: a status code plus a short message body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn unprocessable_entity(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, msg)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }
        let body = Json(ErrorBody {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmptyCredentials => Self::bad_request(err.to_string()),
            UserError::InvalidCredentials => Self::unauthorized(err.to_string()),
            UserError::LoginExists => Self::new(StatusCode::CONFLICT, err.to_string()),
            // Authenticated paths only: a token for a missing user.
            UserError::NotFound => Self::unauthorized(err.to_string()),
            UserError::InsufficientBalance => {
                Self::new(StatusCode::PAYMENT_REQUIRED, err.to_string())
            }
            UserError::PasswordHash(_) | UserError::Token(_) | UserError::Database(_) => {
                tracing::error!(error = %err, "user operation failed");
                Self::internal()
            }
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidNumber => Self::unprocessable_entity(err.to_string()),
            OrderError::OwnedByAnotherUser => Self::new(StatusCode::CONFLICT, err.to_string()),
            // AlreadyUploaded answers 200 on submit; handlers intercept
            // it before conversion. Anything else is unexpected here.
            OrderError::AlreadyUploaded => Self::new(StatusCode::OK, err.to_string()),
            OrderError::AlreadyExists | OrderError::NotFound | OrderError::Database(_) => {
                tracing::error!(error = %err, "order operation failed");
                Self::internal()
            }
        }
    }
}

impl From<WithdrawError> for ApiError {
    fn from(err: WithdrawError) -> Self {
        match err {
            WithdrawError::InvalidNumber | WithdrawError::InvalidSum => {
                Self::unprocessable_entity(err.to_string())
            }
            WithdrawError::AlreadyExists => Self::unprocessable_entity(err.to_string()),
            WithdrawError::InsufficientBalance => {
                Self::new(StatusCode::PAYMENT_REQUIRED, err.to_string())
            }
            WithdrawError::UserNotFound => Self::unauthorized(err.to_string()),
            WithdrawError::Database(_) => {
                tracing::error!(error = %err, "withdrawal failed");
                Self::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_contract_statuses() {
        assert_eq!(
            ApiError::from(UserError::EmptyCredentials).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(UserError::LoginExists).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(UserError::NotFound).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(UserError::InsufficientBalance).status,
            StatusCode::PAYMENT_REQUIRED
        );
    }

    #[test]
    fn order_errors_map_to_contract_statuses() {
        assert_eq!(
            ApiError::from(OrderError::InvalidNumber).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(OrderError::OwnedByAnotherUser).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(OrderError::NotFound).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn withdraw_errors_map_to_contract_statuses() {
        assert_eq!(
            ApiError::from(WithdrawError::InvalidNumber).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(WithdrawError::InvalidSum).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(WithdrawError::AlreadyExists).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(WithdrawError::InsufficientBalance).status,
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ApiError::from(WithdrawError::UserNotFound).status,
            StatusCode::UNAUTHORIZED
        );
    }
}
