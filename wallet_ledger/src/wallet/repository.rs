//! Wallet repository: the transactional balance-adjustment protocol.
//!
//! Conflicting adjustments on the same wallet are serialized by an exclusive
//! row lock (`SELECT ... FOR UPDATE`) held for the duration of a per-call
//! transaction. Adjustments on different wallets run fully in parallel, and
//! plain balance reads never take the lock.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::errors::{WalletError, WalletResult};
use super::models::Wallet;
use crate::db::timeouts::{self, DEFAULT_TRANSACTION_TIMEOUT};

/// Trait for wallet repository operations
///
/// The service consumes the repository only through this trait, so storage
/// can be swapped or mocked without touching validation logic.
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Atomically apply a signed adjustment to a wallet's balance.
    ///
    /// Deposit is a positive `amount`, withdrawal a negative one. A negative
    /// resulting balance is written as-is; this layer does not reject
    /// overdraft.
    async fn adjust(&self, wallet_id: Uuid, amount: i64) -> WalletResult<()>;

    /// Fetch a wallet without locking it.
    ///
    /// Concurrent adjustments are not blocked; the returned balance may be
    /// from just before or just after an in-flight adjustment, never a
    /// partially-applied value.
    async fn get_by_id(&self, wallet_id: Uuid) -> WalletResult<Wallet>;
}

/// PostgreSQL implementation of [`WalletRepository`]
#[derive(Clone)]
pub struct PgWalletRepository {
    pool: PgPool,
    adjust_timeout: Duration,
}

impl PgWalletRepository {
    /// Create a new repository backed by the given pool.
    ///
    /// `DB_TRANSACTION_TIMEOUT_SECS` bounds how long one adjustment may hold
    /// or wait on the row lock (default 10).
    pub fn new(pool: PgPool) -> Self {
        let adjust_timeout = std::env::var("DB_TRANSACTION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TRANSACTION_TIMEOUT);

        Self {
            pool,
            adjust_timeout,
        }
    }

    /// The adjustment protocol: lock, read, compute, write, commit.
    ///
    /// Every early return and any cancellation of this future drops `tx`
    /// uncommitted, which rolls the transaction back; only the final commit
    /// makes the new balance visible.
    async fn adjust_in_tx(&self, wallet_id: Uuid, amount: i64) -> WalletResult<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT balance FROM wallets WHERE id = $1 FOR UPDATE")
            .bind(wallet_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(WalletError::WalletNotFound(wallet_id))?;

        let balance: i64 = row.get("balance");

        // Negative results are written as-is; overdraft is not rejected here.
        let new_balance = balance
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow)?;

        sqlx::query("UPDATE wallets SET balance = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_balance)
            .bind(wallet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl WalletRepository for PgWalletRepository {
    async fn adjust(&self, wallet_id: Uuid, amount: i64) -> WalletResult<()> {
        match tokio::time::timeout(self.adjust_timeout, self.adjust_in_tx(wallet_id, amount)).await
        {
            Ok(result) => result,
            // The timed-out future is dropped, which rolls the transaction
            // back before we report the failure.
            Err(_) => Err(WalletError::Timeout(self.adjust_timeout)),
        }
    }

    async fn get_by_id(&self, wallet_id: Uuid) -> WalletResult<Wallet> {
        let row = timeouts::with_default_timeout(
            sqlx::query("SELECT id, balance, created_at, updated_at FROM wallets WHERE id = $1")
                .bind(wallet_id)
                .fetch_optional(&self.pool),
        )
        .await
        .map_err(WalletError::from)?
        .ok_or(WalletError::WalletNotFound(wallet_id))?;

        Ok(Wallet {
            id: row.get("id"),
            balance: row.get("balance"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            updated_at: row.get::<chrono::NaiveDateTime, _>("updated_at").and_utc(),
        })
    }
}
