//! Postgres-backed withdrawal store.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use super::error::WithdrawError;
use super::models::Withdrawal;
use crate::db::is_unique_violation;

/// Store operations on withdrawal rows.
#[async_trait]
pub trait WithdrawalStore: Send + Sync {
    /// Withdrawals of one user, newest first.
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Withdrawal>, WithdrawError>;
}

pub struct PgWithdrawalRepository {
    pool: PgPool,
}

impl PgWithdrawalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a withdrawal inside the caller's transaction.
    ///
    /// Fails with [`WithdrawError::AlreadyExists`] when the order number
    /// was already used for a withdrawal.
    pub async fn create_in_tx(
        &self,
        conn: &mut PgConnection,
        withdrawal: &Withdrawal,
    ) -> Result<(), WithdrawError> {
        sqlx::query(
            r#"INSERT INTO withdrawals (id, user_id, order_number, sum, processed_at)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(withdrawal.id)
        .bind(withdrawal.user_id)
        .bind(&withdrawal.order_number)
        .bind(withdrawal.sum)
        .bind(withdrawal.processed_at)
        .execute(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                WithdrawError::AlreadyExists
            } else {
                WithdrawError::Database(e)
            }
        })?;

        Ok(())
    }
}

#[async_trait]
impl WithdrawalStore for PgWithdrawalRepository {
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Withdrawal>, WithdrawError> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, order_number, sum, processed_at
               FROM withdrawals
               WHERE user_id = $1
               ORDER BY processed_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| scan_withdrawal(row).map_err(WithdrawError::Database))
            .collect()
    }
}

fn scan_withdrawal(row: &PgRow) -> Result<Withdrawal, sqlx::Error> {
    Ok(Withdrawal {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        order_number: row.try_get("order_number")?,
        sum: row.try_get("sum")?,
        processed_at: row.try_get("processed_at")?,
    })
}
