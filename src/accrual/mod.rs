//! External accrual service integration.
//!
//! [`client`] speaks the accrual HTTP protocol; [`worker`] drives the
//! order status machine and credits balances.

pub mod client;
pub mod worker;

pub use client::{AccrualApi, AccrualError, AccrualReply, HttpAccrualClient};
pub use worker::AccrualWorker;
