use thiserror::Error;

#[derive(Debug, Error)]
pub enum WithdrawError {
    #[error("invalid order number")]
    InvalidNumber,
    #[error("invalid withdrawal sum")]
    InvalidSum,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("user not found")]
    UserNotFound,
    #[error("withdrawal already exists for order")]
    AlreadyExists,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
