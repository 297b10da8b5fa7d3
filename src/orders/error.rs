use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("invalid order number")]
    InvalidNumber,
    #[error("order already uploaded by the same user")]
    AlreadyUploaded,
    #[error("order already uploaded by another user")]
    OwnedByAnotherUser,
    #[error("order already exists")]
    AlreadyExists,
    #[error("order not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
