use thiserror::Error;

use crate::auth::TokenError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("login and password are required")]
    EmptyCredentials,
    #[error("invalid login or password")]
    InvalidCredentials,
    #[error("login already exists")]
    LoginExists,
    #[error("user not found")]
    NotFound,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("failed to hash password: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
