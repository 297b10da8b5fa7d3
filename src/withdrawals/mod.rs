//! Balance withdrawals against external order numbers.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::WithdrawError;
pub use models::Withdrawal;
pub use repository::{PgWithdrawalRepository, WithdrawalStore};
pub use service::WithdrawalService;
