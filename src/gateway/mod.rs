//! HTTP router assembly.

pub mod error;
pub mod state;

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::middleware::require_auth;
use crate::{orders, users, withdrawals};
use state::AppState;

/// Build the application router.
///
/// Register and login are public; everything else requires a bearer
/// token.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/user/register", post(users::handlers::register))
        .route("/api/user/login", post(users::handlers::login));

    let protected = Router::new()
        .route(
            "/api/user/orders",
            post(orders::handlers::submit).get(orders::handlers::list),
        )
        .route("/api/user/balance", get(users::handlers::balance))
        .route(
            "/api/user/balance/withdraw",
            post(withdrawals::handlers::withdraw),
        )
        .route("/api/user/withdrawals", get(withdrawals::handlers::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .with_state(state)
}
