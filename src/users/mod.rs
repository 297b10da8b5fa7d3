//! User accounts and loyalty point balances.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::UserError;
pub use models::{NewUser, User};
pub use repository::{PgUserRepository, UserStore};
pub use service::UserService;
