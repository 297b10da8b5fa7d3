use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

use bonusmart::accrual::{AccrualWorker, HttpAccrualClient, client::DEFAULT_TIMEOUT};
use bonusmart::auth::TokenManager;
use bonusmart::config::Config;
use bonusmart::db::Database;
use bonusmart::gateway::{self, state::AppState};
use bonusmart::orders::{OrderService, PgOrderRepository};
use bonusmart::users::{PgUserRepository, UserService};
use bonusmart::withdrawals::{PgWithdrawalRepository, WithdrawalService};
use bonusmart::logging;

const WORKER_INTERVAL: Duration = Duration::from_secs(5);
const SHUTDOWN_DRAIN: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::load();
    logging::init();
    info!(version = env!("GIT_HASH"), "bonusmart starting");
    cfg.validate()?;

    let db = Database::connect(&cfg.database_uri)
        .await
        .context("unable to connect to database")?;
    info!("running database migrations");
    db.migrate().await.context("failed to run migrations")?;
    db.health_check().await.context("database ping failed")?;

    let pool = db.pool().clone();
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let order_repo = Arc::new(PgOrderRepository::new(pool.clone()));
    let withdrawal_repo = Arc::new(PgWithdrawalRepository::new(pool.clone()));

    let tokens = Arc::new(TokenManager::new(
        cfg.jwt_secret.clone(),
        cfg.token_expiration,
    ));
    let state = AppState {
        users: Arc::new(UserService::new(user_repo.clone(), tokens.clone())),
        orders: Arc::new(OrderService::new(order_repo.clone())),
        withdrawals: Arc::new(WithdrawalService::new(
            pool.clone(),
            user_repo.clone(),
            withdrawal_repo,
        )),
        tokens,
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_handle = match cfg.accrual_address.as_deref() {
        Some(addr) if !addr.is_empty() => {
            info!(address = addr, "starting accrual worker");
            let client = HttpAccrualClient::new(addr, DEFAULT_TIMEOUT)
                .context("failed to build accrual client")?;
            let worker =
                AccrualWorker::new(pool, order_repo, Arc::new(client), WORKER_INTERVAL);
            Some(worker.spawn(shutdown_rx))
        }
        _ => {
            warn!("accrual system address is not configured; orders will not be processed");
            None
        }
    };

    let app = gateway::router(state);
    let listener = tokio::net::TcpListener::bind(&cfg.run_address)
        .await
        .with_context(|| format!("failed to bind {}", cfg.run_address))?;
    info!(address = %cfg.run_address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server stopped")?;

    // Server drained; stop the worker and give it a bounded grace period.
    info!("shutting down");
    let _ = shutdown_tx.send(true);
    if let Some(handle) = worker_handle
        && tokio::time::timeout(SHUTDOWN_DRAIN, handle).await.is_err()
    {
        warn!("accrual worker did not stop within the drain timeout");
    }

    info!("server gracefully stopped");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
