//! Order submission and persistence.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::OrderError;
pub use models::{Order, OrderStatus};
pub use repository::{OrderStore, PgOrderRepository};
pub use service::OrderService;
