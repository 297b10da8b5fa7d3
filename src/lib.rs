//! bonusmart - Loyalty points backend
//!
//! Customers register, submit purchase order numbers, and a background
//! worker reconciles each order against an external accrual service,
//! crediting earned points to the user's balance. Balances can be
//! withdrawn against a new order number.
//!
//! # Modules
//!
//! - [`config`] - CLI flags + environment configuration
//! - [`db`] - PostgreSQL pool and migrations
//! - [`luhn`] - Order number checksum validation
//! - [`auth`] - JWT tokens, password hashing, request authentication
//! - [`users`] - User accounts and balances
//! - [`orders`] - Order submission and persistence
//! - [`withdrawals`] - Balance withdrawal transaction path
//! - [`accrual`] - External accrual client and reconciliation worker
//! - [`gateway`] - HTTP router and error mapping

pub mod accrual;
pub mod auth;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod luhn;
pub mod orders;
pub mod users;
pub mod withdrawals;
