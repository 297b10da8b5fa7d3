use std::sync::Arc;

use crate::auth::TokenManager;
use crate::orders::OrderService;
use crate::users::UserService;
use crate::withdrawals::WithdrawalService;

/// Shared application state for HTTP handlers.
///
/// Services are stateless and safe for concurrent use from any number
/// of request tasks.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub orders: Arc<OrderService>,
    pub withdrawals: Arc<WithdrawalService>,
    pub tokens: Arc<TokenManager>,
}
